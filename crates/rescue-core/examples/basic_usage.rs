//! Basic usage example for rescue-core
//!
//! Run with: cargo run --example basic_usage

use rescue_core::{Class, Exception, RawFrame, RecordedStack, SystemCallError, Value};
use std::sync::Arc;

fn main() {
    println!("=== Rescue Core Basic Usage Example ===\n");

    // Example 1: Building an interpreter stack
    println!("1. Recording a Stack:");
    let mut stack = RecordedStack::new();
    stack.push(RawFrame::new("main").at("app.rb", 30));
    stack.push(RawFrame::new("Store#save").at("lib/store.rb", 12));
    stack.push(RawFrame::new("Kernel#raise").at("kernel/common/kernel.rb", 5));
    println!("   Depth: {}\n", stack.depth());

    // Example 2: Raising and reading the backtrace
    println!("2. Raising a SystemCallError:");
    let mut root = SystemCallError::new(
        Class::SystemCallError,
        &[Value::from("open"), Value::from(libc::ENOENT), Value::from("/var/db")],
    )
    .unwrap_or_else(Exception::from);
    root.capture_backtrace(&stack, 1);
    println!("   Class: {}", root.class());
    println!("   Message: {}", root.message());
    for line in root.backtrace().unwrap_or_default() {
        println!("   {}", line);
    }
    println!();

    // Example 3: Chaining a cause
    println!("3. Chaining a Cause:");
    let mut top = Exception::with_text(Class::RuntimeError, "save failed");
    top.capture_backtrace(&stack, 1);
    top.set_cause(Some(Arc::new(root)));
    println!("   Inspect: {}", top.inspect());
    println!("   Is a StandardError: {}\n", top.is_a(Class::StandardError));

    // Example 4: Re-raising with a new message
    println!("4. Re-raising:");
    let top = Arc::new(top);
    let copy = top.exception(Some("save failed twice".into()));
    println!("   Same object: {}", Arc::ptr_eq(&top, &copy));
    println!("   New message: {}\n", copy.message());

    // Example 5: Rendering the report
    println!("5. Rendering:");
    print!("{}", copy.render_to_string("An exception occurred", false));

    println!("\n=== Example Complete ===");
}
