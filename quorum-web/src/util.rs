use quorum_client::api::Time;

pub fn author_label(author_name: &Option<String>, is_anonymous: bool) -> String {
    match author_name {
        Some(name) if !is_anonymous => name.clone(),
        _ => String::from("Anonymous"),
    }
}

pub fn format_time(t: &Time) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}
