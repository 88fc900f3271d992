//! Signal table interface
//!
//! Signal names and numbers are platform data owned by the host. Names are
//! given without the `SIG` prefix (`"INT"`, `"TERM"`).

/// Lookup between signal names and numbers
pub trait SignalTable {
    fn number_for_name(&self, name: &str) -> Option<i32>;

    fn name_for_number(&self, number: i32) -> Option<String>;
}

impl<T: SignalTable + ?Sized> SignalTable for &T {
    fn number_for_name(&self, name: &str) -> Option<i32> {
        (**self).number_for_name(name)
    }

    fn name_for_number(&self, number: i32) -> Option<String> {
        (**self).name_for_number(number)
    }
}

/// How a signal is identified when constructing a `SignalException`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalSpec {
    Number(i32),
    /// Name with or without the `SIG` prefix
    Name(String),
}

impl From<i32> for SignalSpec {
    fn from(number: i32) -> Self {
        SignalSpec::Number(number)
    }
}

impl From<&str> for SignalSpec {
    fn from(name: &str) -> Self {
        SignalSpec::Name(name.to_string())
    }
}

impl From<String> for SignalSpec {
    fn from(name: String) -> Self {
        SignalSpec::Name(name)
    }
}
