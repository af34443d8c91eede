use std::thread;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_buffer_captures_lines_and_fragments() {
    let handler = buffer_handler();
    handler.print("> ");
    handler.println("first");
    handler.println("second");
    assert_eq!(handler.get_output(), "> first\nsecond\n");
}

#[test]
fn test_buffer_clear() {
    let handler = buffer_handler();
    handler.println("gone");
    handler.clear();
    assert_eq!(handler.get_output(), "");
}

#[test]
fn test_non_capturing_handlers_report_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.get_output(), "");
    assert_eq!(stdout_handler().get_output(), "");
}

#[test]
fn test_buffer_shared_across_threads() {
    let handler = buffer_handler();
    let writer = Arc::clone(&handler);
    let worker = thread::spawn(move || {
        for _ in 0..50 {
            writer.println("a");
        }
    });
    for _ in 0..50 {
        handler.println("b");
    }
    assert!(worker.join().is_ok());
    assert_eq!(handler.get_output().lines().count(), 100);
}
