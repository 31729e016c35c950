//! Query behavior: what a driver can and cannot see.
//!
//! These tests pin down discoverability — hidden content is unreachable,
//! disabled content is found, row queries stay inside list containers —
//! and the two failure policies. Interaction effects are covered in
//! `interactions.rs`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{form_app, table_root, StubStoryboards};
use tocar::{App, ElementKind, FailurePolicy, TocarError};

// ===== Layout sources =====

#[test]
fn test_builds_an_app_from_a_layout_source() {
    let source = StubStoryboards::fixture_set();
    let app = App::from_source(&source, "Main", "form", FailurePolicy::RaiseError).unwrap();
    assert!(app.label("Label text").unwrap().is_some());
}

#[test]
fn test_an_unknown_root_is_a_construction_error() {
    let source = StubStoryboards::fixture_set();
    let error =
        App::from_source(&source, "Main", "missing", FailurePolicy::RaiseError).unwrap_err();
    assert!(matches!(error, TocarError::RootNotFound { .. }));
    assert_eq!(error.to_string(), "no root \"missing\" in resource \"Main\"");
}

// ===== Labels =====

#[test]
fn test_finds_a_label_by_its_exact_text() {
    let app = form_app(FailurePolicy::RaiseError);
    let label = app.label("Label text").unwrap().unwrap();
    assert_eq!(label.text(), "Label text");
}

#[test]
fn test_a_hidden_label_is_unreachable() {
    let app = form_app(FailurePolicy::ReturnAbsent);
    assert!(app.label("Hidden label text").unwrap().is_none());
}

// ===== Buttons =====

#[test]
fn test_finds_a_button_by_its_title() {
    let app = form_app(FailurePolicy::RaiseError);
    let button = app.button("Button title").unwrap().unwrap();
    assert_eq!(button.title(), "Button title");
    assert!(button.is_enabled());
}

#[test]
fn test_a_hidden_button_is_unreachable() {
    let app = form_app(FailurePolicy::ReturnAbsent);
    assert!(app.button("Hidden button title").unwrap().is_none());
}

#[test]
fn test_a_disabled_button_is_still_discoverable() {
    let app = form_app(FailurePolicy::RaiseError);
    let button = app.button("Disabled button title").unwrap().unwrap();
    assert!(!button.is_enabled());
}

// ===== Stateful controls =====

#[test]
fn test_finds_each_control_by_its_accessibility_label() {
    let app = form_app(FailurePolicy::RaiseError);

    let toggle = app.toggle_control("A switch").unwrap().unwrap();
    assert!(!toggle.is_on());

    let stepper = app.stepper("A stepper").unwrap().unwrap();
    assert_eq!(stepper.value(), 2.0);

    let slider = app.slider("A slider").unwrap().unwrap();
    assert_eq!(slider.value(), 2.0);

    let input = app.text_input("Text field placeholder").unwrap().unwrap();
    assert_eq!(input.placeholder(), "Text field placeholder");
    assert_eq!(input.text(), "");
}

#[test]
fn test_hidden_controls_are_unreachable() {
    let app = form_app(FailurePolicy::ReturnAbsent);
    assert!(app.toggle_control("A hidden switch").unwrap().is_none());
    assert!(app.stepper("A hidden stepper").unwrap().is_none());
    assert!(app.slider("A hidden slider").unwrap().is_none());
    assert!(app
        .text_input("Hidden text field placeholder")
        .unwrap()
        .is_none());
}

#[test]
fn test_disabled_controls_are_still_discoverable() {
    let app = form_app(FailurePolicy::RaiseError);
    assert!(!app
        .toggle_control("A disabled switch")
        .unwrap()
        .unwrap()
        .is_enabled());
    assert!(!app
        .stepper("A disabled stepper")
        .unwrap()
        .unwrap()
        .is_enabled());
    assert!(!app
        .slider("A disabled slider")
        .unwrap()
        .unwrap()
        .is_enabled());
    assert!(!app
        .text_input("Disabled text field placeholder")
        .unwrap()
        .unwrap()
        .is_enabled());
}

// ===== List rows =====

#[test]
fn test_finds_a_row_by_contained_text() {
    let app = App::with_policy(table_root(), FailurePolicy::RaiseError);
    let row = app.cell("Three").unwrap().unwrap();
    assert_eq!(row.visible_text(), "Row Three");
}

#[test]
fn test_row_queries_stay_inside_list_containers() {
    let app = App::with_policy(table_root(), FailurePolicy::ReturnAbsent);
    // The same word reaches a plain label through a label query, but a
    // row query must not escape the list.
    assert!(app.label("Standalone Three").unwrap().is_some());
    assert!(app.cell("Standalone").unwrap().is_none());
}

#[test]
fn test_cells_lists_visible_rows_in_declaration_order() {
    let app = App::with_policy(table_root(), FailurePolicy::ReturnAbsent);
    let texts: Vec<String> = app.cells().iter().map(|row| row.visible_text()).collect();
    assert_eq!(texts, vec!["Row One", "Row Two", "Row Three"]);
    assert!(app.cell("Hidden").unwrap().is_none());
}

// ===== Failure policies =====

#[test]
fn test_missing_elements_raise_catchable_errors() {
    let app = form_app(FailurePolicy::RaiseError);

    let error = app.label("Missing element").unwrap_err();
    assert_eq!(
        error.to_string(),
        "no label found with text \"Missing element\""
    );

    let error = app.toggle_control("Missing element").unwrap_err();
    assert_eq!(
        error.to_string(),
        "no toggle found with accessibility label \"Missing element\""
    );

    let error = app.cell("Missing element").unwrap_err();
    assert_eq!(
        error.to_string(),
        "no cell found with contained text \"Missing element\""
    );
}

#[test]
fn test_element_not_found_carries_the_query_shape() {
    let app = form_app(FailurePolicy::RaiseError);
    let error = app.button("Missing element").unwrap_err();
    assert!(matches!(
        error,
        TocarError::ElementNotFound {
            kind: ElementKind::Button,
            attribute: "title",
            ref value,
        } if value == "Missing element"
    ));
}

#[test]
fn test_the_absent_policy_answers_none_for_every_query_kind() {
    let app = form_app(FailurePolicy::ReturnAbsent);
    assert!(app.label("Missing element").unwrap().is_none());
    assert!(app.button("Missing element").unwrap().is_none());
    assert!(app.toggle_control("Missing element").unwrap().is_none());
    assert!(app.stepper("Missing element").unwrap().is_none());
    assert!(app.slider("Missing element").unwrap().is_none());
    assert!(app.text_input("Missing element").unwrap().is_none());
    assert!(app.cell("Missing element").unwrap().is_none());
}

// ===== Snapshots =====

#[test]
fn test_snapshots_show_what_a_query_can_reach() {
    let app = form_app(FailurePolicy::RaiseError);
    let rendered = app.snapshot().to_string();
    assert!(rendered.contains("label \"Label text\""));
    assert!(rendered.contains("button \"Disabled button title\" (disabled)"));
    assert!(rendered.contains("slider \"A slider\" = 2"));
    assert!(!rendered.contains("Hidden label text"));
    assert!(!rendered.contains("A hidden switch"));
}
