use core_model::Region;
use core_terminal::{Attr, Terminal};
use core_widgets::{Table, TableSource, WidgetError};
use pretty_assertions::assert_eq;

type Row = (String, String);

fn row(a: &str, b: &str) -> Row {
    (a.to_string(), b.to_string())
}

fn source(rows: Vec<Row>) -> TableSource<Row> {
    TableSource::new(["A", "BB"], |r: &Row, col| {
        if col == 0 { r.0.clone() } else { r.1.clone() }
    })
    .rows(rows)
}

#[test]
fn auto_resized_table_renders_box_grid() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let table = Table::new(
        &term,
        source(vec![row("x", "yyy")]).auto_resize(true),
        Region::sized(8, 20),
    )
    .unwrap();
    assert_eq!(table.region(), Region::sized(5, 11));
    assert_eq!(table.lengths(), [1, 3]);
    assert_eq!(
        screen.borrow().lines()[..6],
        [
            "┌───┬─────┐",
            "│ A │ BB  │",
            "├───┼─────┤",
            "│ x │ yyy │",
            "└───┴─────┘",
            "",
        ]
    );
}

#[test]
fn set_data_refits_and_redraws() {
    let (term, screen) = Terminal::headless(10, 20, []);
    let mut table = Table::new(
        &term,
        source(vec![row("x", "yyy")]).auto_resize(true),
        Region::new(5, 11, 1, 2),
    )
    .unwrap();
    table.highlight_row(0).unwrap();
    table
        .set_data(vec![row("x", "yyy"), row("long", "z")], true)
        .unwrap();
    assert_eq!(table.highlighted(), None);
    assert_eq!(table.region(), Region::new(6, 14, 1, 2));
    let screen = screen.borrow();
    assert_eq!(screen.slice(1, 2, 14), "┌──────┬─────┐");
    assert_eq!(screen.slice(5, 2, 14), "│ long │ z   │");
    assert_eq!(screen.slice(6, 2, 14), "└──────┴─────┘");
}

#[test]
fn highlighted_row_is_reverse_video() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let mut table = Table::new(
        &term,
        source(vec![row("a", "b"), row("c", "d")]),
        Region::sized(6, 12),
    )
    .unwrap();
    table.highlight_row(1).unwrap();
    assert_eq!(table.highlighted(), Some(1));
    let screen = screen.borrow();
    // data row 1 is grid line 4; its cell text starts one column in
    assert_eq!(screen.cell(4, 2).unwrap().attr, Attr::REVERSE);
    assert_eq!(screen.cell(4, 0).unwrap().attr, Attr::NORMAL);
    assert_eq!(screen.cell(3, 2).unwrap().attr, Attr::NORMAL);
}

#[test]
fn out_of_range_highlight_clears_instead_of_failing() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let mut table = Table::new(&term, source(vec![row("a", "b")]), Region::sized(5, 12)).unwrap();
    table.highlight_row(0).unwrap();
    table.highlight_row(7).unwrap();
    assert_eq!(table.highlighted(), None);
    assert_eq!(screen.borrow().cell(3, 2).unwrap().attr, Attr::NORMAL);
}

#[test]
fn pinned_lengths_cut_cells() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let table = Table::new(
        &term,
        source(vec![row("abcdef", "z")]).lengths(vec![3, 2]),
        Region::sized(5, 12),
    )
    .unwrap();
    assert!(table.lengths_pinned());
    assert_eq!(screen.borrow().slice(3, 0, 12), "│ abc │ z  │");
}

#[test]
fn pinned_lengths_must_match_headers() {
    let (term, _screen) = Terminal::headless(8, 20, []);
    let err = Table::new(
        &term,
        source(Vec::new()).lengths(vec![3]),
        Region::sized(5, 12),
    )
    .err()
    .unwrap();
    assert!(matches!(
        err,
        WidgetError::LengthCount {
            expected: 2,
            got: 1
        }
    ));
}

#[test]
fn table_outside_screen_is_rejected() {
    let (term, _screen) = Terminal::headless(4, 10, []);
    assert!(Table::new(&term, source(Vec::new()), Region::sized(5, 12)).is_err());
}

#[test]
fn dropping_the_table_clears_it() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let table = Table::new(&term, source(vec![row("a", "b")]), Region::sized(5, 12)).unwrap();
    assert!(!screen.borrow().is_blank());
    drop(table);
    assert!(screen.borrow().is_blank());
}

#[test]
fn swapped_generator_rederives_widths() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let mut table = Table::new(&term, source(vec![row("x", "yyy")]), Region::sized(5, 14)).unwrap();
    table
        .set_generator(|r: &Row, col| if col == 0 { r.1.clone() } else { r.0.clone() })
        .unwrap();
    assert_eq!(table.lengths(), [3, 2]);
    let screen = screen.borrow();
    assert_eq!(screen.slice(1, 0, 12), "│ A   │ BB │");
    assert_eq!(screen.slice(3, 0, 12), "│ yyy │ x  │");
}

#[test]
fn pinned_lengths_survive_new_data_and_generator() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let mut table = Table::new(&term, source(vec![row("x", "yyy")]), Region::sized(6, 14)).unwrap();
    table.set_lengths(vec![1, 1]).unwrap();
    assert!(table.lengths_pinned());
    assert_eq!(screen.borrow().lines()[3], "│ x │ y │");

    table
        .set_data(vec![row("long", "zz"), row("q", "r")], false)
        .unwrap();
    assert_eq!(table.lengths(), [1, 1]);
    assert_eq!(screen.borrow().slice(3, 0, 9), "│ l │ z │");

    table
        .set_generator(|r: &Row, _| format!("{}!", r.0))
        .unwrap();
    assert_eq!(table.lengths(), [1, 1]);
    assert_eq!(screen.borrow().slice(4, 0, 9), "│ q │ q │");
}

#[test]
fn wrong_width_count_leaves_table_unchanged() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let mut table = Table::new(&term, source(vec![row("x", "yyy")]), Region::sized(5, 12)).unwrap();
    let err = table.set_lengths(vec![4, 4, 4]).err().unwrap();
    assert!(matches!(
        err,
        WidgetError::LengthCount {
            expected: 2,
            got: 3
        }
    ));
    assert!(!table.lengths_pinned());
    assert_eq!(table.lengths(), [1, 3]);
    assert_eq!(screen.borrow().slice(3, 0, 11), "│ x │ yyy │");
}

#[test]
fn unpinning_restores_derived_widths() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let mut table = Table::new(
        &term,
        source(vec![row("abcdef", "z")]).lengths(vec![3, 2]),
        Region::sized(5, 16),
    )
    .unwrap();
    table.unpin_lengths().unwrap();
    assert!(!table.lengths_pinned());
    assert_eq!(table.lengths(), [6, 2]);
    assert_eq!(screen.borrow().slice(3, 0, 15), "│ abcdef │ z  │");
}

#[test]
fn clear_highlight_restores_normal_video() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let mut table = Table::new(
        &term,
        source(vec![row("a", "b"), row("c", "d")]),
        Region::sized(6, 12),
    )
    .unwrap();
    table.highlight_row(0).unwrap();
    assert_eq!(screen.borrow().cell(3, 2).unwrap().attr, Attr::REVERSE);
    table.clear_highlight().unwrap();
    assert_eq!(table.highlighted(), None);
    let screen = screen.borrow();
    assert_eq!(screen.cell(3, 2).unwrap().attr, Attr::NORMAL);
    assert_eq!(screen.lines()[3], "│ a │ b  │");
}

#[test]
fn oversized_refit_fails_and_keeps_old_grid() {
    let (term, screen) = Terminal::headless(8, 20, []);
    let mut table = Table::new(
        &term,
        source(vec![row("x", "yyy")]).auto_resize(true),
        Region::sized(8, 20),
    )
    .unwrap();
    let wide = "w".repeat(30);
    assert!(table.set_data(vec![row("x", &wide)], true).is_err());
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.lengths(), [1, 3]);
    assert_eq!(table.region(), Region::sized(5, 11));
    let screen = screen.borrow();
    assert_eq!(screen.slice(0, 0, 11), "┌───┬─────┐");
    assert_eq!(screen.slice(3, 0, 11), "│ x │ yyy │");
}
