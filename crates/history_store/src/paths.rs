#[must_use]
pub fn sanitize_key_for_filename(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            ':' | '/' | '\\' | ' ' | '.' => '-',
            _ => c,
        })
        .collect()
}

#[must_use]
pub fn key_file_name(key: &str) -> String {
    format!("{}.json", sanitize_key_for_filename(key))
}

#[cfg(test)]
mod tests {
    use super::key_file_name;

    #[test]
    fn key_file_names_are_flat() {
        assert_eq!(key_file_name("echoai_reply_history"), "echoai_reply_history.json");
        assert_eq!(key_file_name("../etc/passwd"), "---etc-passwd.json");
        assert_eq!(key_file_name("a b:c"), "a-b-c.json");
    }
}
