use chrono::NaiveDate;

use crate::calendar;
use crate::store::TaskStore;
use crate::task::{Category, Location, Person, Priority, Subtask, Task, TaskStatus};

fn subtasks(items: &[(&str, bool)]) -> Option<Vec<Subtask>> {
    Some(
        items
            .iter()
            .map(|(title, completed)| Subtask {
                id: crate::task::generate_id(),
                title: title.to_string(),
                completed: *completed,
            })
            .collect(),
    )
}

fn tags(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|t| t.to_string()).collect())
}

/// Sample tasks so a fresh board is not empty: one in someday, one on today's
/// column, one due two days ago.
pub fn sample_tasks(today: NaiveDate) -> Vec<Task> {
    let john = Person::new("1", "John Doe");
    let jane = Person::new("2", "Jane Smith");
    let alex = Person::new("3", "Alex Johnson");
    let sarah = Person::new("4", "Sarah Wilson");
    let mike = Person::new("5", "Mike Chen");

    let goals = Task {
        description: Some("Prepare for team meeting and review Q4 objectives".to_string()),
        notes: Some("Prepare for team meeting".to_string()),
        tags: tags(&["work", "planning"]),
        people: Some(vec![john.clone(), jane]),
        status: Some(TaskStatus::Todo),
        priority: Some(Priority::Medium),
        category: Some(Category::Work),
        subtasks: subtasks(&[
            ("Gather Q3 metrics", true),
            ("Prepare presentation slides", false),
            ("Schedule team meeting", false),
        ]),
        created_by: Some(alex),
        ..Task::new("Review quarterly goals")
    };

    let ux = Task {
        description: Some("Using tools for upcoming design review".to_string()),
        notes: Some("Update color palette and typography".to_string()),
        tags: tags(&["UI/UX Design", "Frontend"]),
        people: Some(vec![sarah.clone()]),
        status: Some(TaskStatus::InProgress),
        priority: Some(Priority::Medium),
        category: Some(Category::Work),
        due_date: Some(calendar::add_days(today, 5)),
        scheduled_date: Some(today),
        subtasks: subtasks(&[("Research user feedback", false)]),
        created_by: Some(sarah),
        location: Location::Day(today),
        ..Task::new("Develop For Team UX")
    };

    let presentation = Task {
        description: Some("Prepare slides for Q4 review and client meeting".to_string()),
        notes: Some("Prepare slides for Q4 review".to_string()),
        tags: tags(&["client", "presentation"]),
        people: Some(vec![john.clone(), mike]),
        status: Some(TaskStatus::Blocked),
        priority: Some(Priority::Urgent),
        category: Some(Category::Private),
        due_date: Some(calendar::add_days(today, -2)),
        subtasks: subtasks(&[
            ("Create slide deck", true),
            ("Review with team", false),
            ("Practice presentation", false),
            ("Prepare Q&A section", false),
        ]),
        created_by: Some(john),
        ..Task::new("Client presentation")
    };

    vec![goals, ux, presentation]
}

pub fn seed(store: &mut TaskStore, today: NaiveDate) {
    for task in sample_tasks(today) {
        store.insert_task(task);
    }
}
