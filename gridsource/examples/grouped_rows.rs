// Example: grouping a flat dataset with expand/collapse state.
use gridsource::{GroupConfig, GroupValue, GroupedRow, GroupingSession};

#[derive(Clone, Debug)]
struct Employee {
    id: u32,
    dept: &'static str,
}

fn print_rows(rows: &[GroupedRow<Employee>]) {
    for row in rows {
        match row {
            GroupedRow::Group(g) => {
                println!("{} [{}] expanded={}", g.group_key, g.count, g.is_expanded);
            }
            GroupedRow::Data { data, .. } => println!("  #{}", data.id),
        }
    }
}

fn main() {
    let data = vec![
        Employee { id: 1, dept: "Eng" },
        Employee { id: 2, dept: "Sales" },
        Employee { id: 3, dept: "Eng" },
    ];

    let mut session = GroupingSession::new(GroupConfig::new(|e: &Employee| {
        GroupValue::from(e.dept)
    }));
    session.set_data(data);

    println!("-- initial (all expanded)");
    print_rows(&session.rows());

    session.toggle("Eng");
    println!("-- after collapsing Eng");
    print_rows(&session.rows());
}
