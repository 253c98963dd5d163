//! Unit tests for the in-process task dialog.

use std::sync::{Arc, Mutex};

use company_communicator::dialog::{DialogResult, LocalDialog, TaskDialog};

fn recorder() -> (Arc<Mutex<Vec<DialogResult>>>, impl Fn() -> Box<dyn FnOnce(&DialogResult) + Send>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let make = move || {
        let sink = Arc::clone(&sink);
        Box::new(move |result: &DialogResult| {
            sink.lock().expect("lock").push(result.clone());
        }) as Box<dyn FnOnce(&DialogResult) + Send>
    };
    (seen, make)
}

fn submitted() -> DialogResult {
    DialogResult::Submitted {
        notification_id: "n-1".into(),
    }
}

#[test]
fn new_dialog_is_open() {
    assert_eq!(LocalDialog::new().result(), None);
}

#[test]
fn close_runs_registered_handlers_in_order() {
    let dialog = LocalDialog::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second"] {
        let order = Arc::clone(&order);
        dialog.on_close(Box::new(move |_: &DialogResult| {
            order.lock().expect("lock").push(tag);
        }));
    }

    dialog.close(submitted());

    assert_eq!(*order.lock().expect("lock"), vec!["first", "second"]);
    assert_eq!(dialog.result(), Some(submitted()));
}

#[test]
fn second_close_is_ignored() {
    let dialog = LocalDialog::new();
    let (seen, handler) = recorder();
    dialog.on_close(handler());

    dialog.close(submitted());
    dialog.close(DialogResult::Cancelled);

    assert_eq!(*seen.lock().expect("lock"), vec![submitted()]);
    assert_eq!(dialog.result(), Some(submitted()));
}

#[test]
fn handler_registered_after_close_runs_immediately() {
    let dialog = LocalDialog::new();
    dialog.close(DialogResult::Cancelled);

    let (seen, handler) = recorder();
    dialog.on_close(handler());

    assert_eq!(*seen.lock().expect("lock"), vec![DialogResult::Cancelled]);
}

#[test]
fn handler_may_query_dialog_while_closing() {
    let dialog = Arc::new(LocalDialog::new());
    let observed = Arc::new(Mutex::new(None));
    {
        let dialog_ref = Arc::clone(&dialog);
        let observed = Arc::clone(&observed);
        dialog.on_close(Box::new(move |_: &DialogResult| {
            *observed.lock().expect("lock") = dialog_ref.result();
        }));
    }

    dialog.close(submitted());

    assert_eq!(*observed.lock().expect("lock"), Some(submitted()));
}

#[test]
fn result_serializes_with_outcome_tag() {
    let json = serde_json::to_value(submitted()).expect("serialize");
    assert_eq!(json["outcome"], "submitted");
    assert_eq!(json["notification_id"], "n-1");

    let json = serde_json::to_value(DialogResult::Cancelled).expect("serialize");
    assert_eq!(json["outcome"], "cancelled");
}

#[test]
fn dialog_usable_as_trait_object() {
    let dialog: Box<dyn TaskDialog> = Box::new(LocalDialog::new());
    dialog.close(DialogResult::Cancelled);
}
