// Ordered multi-select behavior driven through the public API

mod common;

use common::{key, shift};
use crossterm::event::KeyCode;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tui_settings::view::ordered_select::{OrderedListOption, OrderedMultiSelect};
use tui_settings::view::panel::{plain_text, Panel};

type Outcome = Rc<RefCell<Vec<Option<String>>>>;

const IDS: [&str; 5] = ["a", "b", "c", "d", "e"];

fn widget(current: &str) -> (OrderedMultiSelect, Outcome) {
    let outcome: Outcome = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outcome);
    let options = IDS
        .iter()
        .map(|id| OrderedListOption::new(*id, id.to_uppercase()))
        .collect();
    let widget = OrderedMultiSelect::new(
        options,
        current,
        Box::new(move |value| sink.borrow_mut().push(value)),
    );
    (widget, outcome)
}

#[test]
fn test_selected_rows_come_first_with_rank() {
    common::tracing::init_tracing_from_env();
    let (widget, _) = widget("d,b");
    assert_eq!(widget.displayed_ids(), vec!["d", "b", "a", "c", "e"]);

    let text = plain_text(&widget.render(80));
    assert_eq!(text[0], "→ ✓1 D");
    assert_eq!(text[1], "  ✓2 B");
    assert_eq!(text[2], "     A");
}

#[test]
fn test_confirm_reports_comma_separated_ids() {
    let (mut widget, outcome) = widget(" c , a ,,");
    widget.handle_key(key(KeyCode::Enter));
    assert_eq!(*outcome.borrow(), vec![Some("c,a".to_string())]);
    assert!(widget.is_done());

    // Input after completion is ignored
    widget.handle_key(key(KeyCode::Enter));
    assert_eq!(outcome.borrow().len(), 1);
}

#[test]
fn test_nothing_selected_is_empty_string() {
    let (mut widget, outcome) = widget("");
    widget.handle_key(key(KeyCode::Enter));
    assert_eq!(*outcome.borrow(), vec![Some(String::new())]);
}

#[test]
fn test_cancel_reports_none() {
    let (mut widget, outcome) = widget("a");
    widget.handle_key(key(KeyCode::Down));
    widget.handle_key(key(KeyCode::Char(' ')));
    widget.handle_key(key(KeyCode::Esc));
    assert_eq!(*outcome.borrow(), vec![None]);
}

#[test]
fn test_reorder_at_boundary_is_ignored() {
    let (mut widget, _) = widget("a,b");
    widget.handle_key(shift(KeyCode::Up));
    assert_eq!(widget.selected(), ["a", "b"]);
    assert_eq!(widget.cursor_index(), 0);

    widget.handle_key(key(KeyCode::Down));
    widget.handle_key(shift(KeyCode::Down));
    assert_eq!(widget.selected(), ["a", "b"]);
    assert_eq!(widget.cursor_index(), 1);

    // Unselected rows cannot move
    widget.handle_key(key(KeyCode::Down));
    widget.handle_key(shift(KeyCode::Up));
    assert_eq!(widget.selected(), ["a", "b"]);
    assert_eq!(widget.cursor_index(), 2);
}

#[derive(Debug, Clone)]
enum Op {
    Up,
    Down,
    Toggle,
    MoveUp,
    MoveDown,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Up),
        Just(Op::Down),
        Just(Op::Toggle),
        Just(Op::MoveUp),
        Just(Op::MoveDown),
    ]
}

fn apply(widget: &mut OrderedMultiSelect, op: &Op) {
    let event = match op {
        Op::Up => key(KeyCode::Up),
        Op::Down => key(KeyCode::Down),
        Op::Toggle => key(KeyCode::Char(' ')),
        Op::MoveUp => shift(KeyCode::Up),
        Op::MoveDown => shift(KeyCode::Down),
    };
    widget.handle_key(event);
}

proptest! {
    #[test]
    fn prop_selection_is_unique_known_subset(ops in prop::collection::vec(op(), 0..40)) {
        let (mut widget, _) = widget("");
        for op in &ops {
            apply(&mut widget, op);
        }

        let unique: HashSet<&String> = widget.selected().iter().collect();
        prop_assert_eq!(unique.len(), widget.selected().len());
        for id in widget.selected() {
            prop_assert!(IDS.contains(&id.as_str()));
        }
        prop_assert!(widget.cursor_index() < IDS.len());
    }

    #[test]
    fn prop_move_down_then_up_restores(count in 2usize..=5, row in 0usize..4) {
        let current = IDS[..count].join(",");
        let row = row % (count - 1);
        let (mut widget, _) = widget(&current);
        for _ in 0..row {
            widget.handle_key(key(KeyCode::Down));
        }

        widget.handle_key(shift(KeyCode::Down));
        prop_assert_eq!(widget.cursor_index(), row + 1);
        prop_assert_eq!(widget.selected()[row + 1].as_str(), IDS[row]);

        widget.handle_key(shift(KeyCode::Up));
        prop_assert_eq!(widget.cursor_index(), row);
        prop_assert_eq!(widget.value(), current);
    }

    #[test]
    fn prop_toggle_off_on_appends(count in 1usize..=5, row in 0usize..5) {
        let current = IDS[..count].join(",");
        let row = row % count;
        let (mut widget, _) = widget(&current);
        for _ in 0..row {
            widget.handle_key(key(KeyCode::Down));
        }

        widget.handle_key(key(KeyCode::Char(' ')));
        // The option is now the first unselected row
        for _ in row..count - 1 {
            widget.handle_key(key(KeyCode::Down));
        }
        widget.handle_key(key(KeyCode::Char(' ')));

        let mut expected: Vec<&str> = IDS[..count].to_vec();
        let moved = expected.remove(row);
        expected.push(moved);
        prop_assert_eq!(widget.selected().to_vec(), expected);
    }
}
