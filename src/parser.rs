use crate::models::Category;
use regex::Regex;

#[derive(Debug, PartialEq)]
pub struct ParsedTask {
    pub title: String,
    pub time: Option<String>,
    // Raw digits are kept when they don't fit a u32
    pub duration: Option<Result<u32, String>>,
    pub category: Option<Category>,
}

/// Splits a quick-add line such as `Walk the dog @12:30 ~20 #break` into
/// its title and the optional time, duration and category tokens.
///
/// The first occurrence of each token wins. Hashtags that don't name a
/// category stay in the title, and so does a `~` followed by anything but
/// digits and an optional `m`/`min` suffix.
pub fn parse_task_input(input: &str) -> ParsedTask {
    let time_re = Regex::new(r"@(\d{1,2}:\d{2})\s*").expect("valid time pattern");
    let duration_re = Regex::new(r"~(\d+)(?:min|m)?\b\s*").expect("valid duration pattern");
    let category_re = Regex::new(r"#(\w+)\s*").expect("valid category pattern");

    let mut time = None;
    let mut duration = None;
    let mut category = None;

    // Time
    if let Some(caps) = time_re.captures(input) {
        time = caps.get(1).map(|m| m.as_str().to_string());
    }

    // Duration, range checks are left to the caller
    if let Some(caps) = duration_re.captures(input) {
        duration = caps.get(1).map(|m| {
            let raw = m.as_str();
            raw.parse::<u32>().map_err(|_| raw.to_string())
        });
    }

    // Category, only known names are consumed
    let title = category_re.replace_all(input, |caps: &regex::Captures| {
        match caps[1].parse::<Category>() {
            Ok(c) => {
                if category.is_none() {
                    category = Some(c);
                }
                String::new()
            }
            Err(_) => caps[0].to_string(),
        }
    });

    let title = time_re.replace_all(&title, "");
    let title = duration_re.replace_all(&title, "");

    let title = Regex::new(r"\s+")
        .expect("valid whitespace pattern")
        .replace_all(&title, " ")
        .trim()
        .to_string();

    ParsedTask {
        title,
        time,
        duration,
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_title() {
        let input = "Call the dentist";
        let expected = ParsedTask {
            title: "Call the dentist".to_string(),
            time: None,
            duration: None,
            category: None,
        };
        assert_eq!(parse_task_input(input), expected);
    }

    #[test]
    fn test_parse_all_tokens() {
        let input = "Walk the dog @12:30 ~20 #break";
        let expected = ParsedTask {
            title: "Walk the dog".to_string(),
            time: Some("12:30".to_string()),
            duration: Some(Ok(20)),
            category: Some(Category::Break),
        };
        assert_eq!(parse_task_input(input), expected);
    }

    #[test]
    fn test_parse_tokens_in_middle_with_extra_spaces() {
        let input = "Write   report @9:00   ~45min for   #Work the team";
        let expected = ParsedTask {
            title: "Write report for the team".to_string(),
            time: Some("9:00".to_string()),
            duration: Some(Ok(45)),
            category: Some(Category::Work),
        };
        assert_eq!(parse_task_input(input), expected);
    }

    #[test]
    fn test_parse_first_token_wins() {
        let input = "  #learning #work Read a chapter ~30 ~60 @18:00 @19:00 ";
        let expected = ParsedTask {
            title: "Read a chapter".to_string(),
            time: Some("18:00".to_string()),
            duration: Some(Ok(30)),
            category: Some(Category::Learning),
        };
        assert_eq!(parse_task_input(input), expected);
    }

    #[test]
    fn test_parse_unknown_tag_stays_in_title() {
        let input = "Buy milk #groceries";
        let expected = ParsedTask {
            title: "Buy milk #groceries".to_string(),
            time: None,
            duration: None,
            category: None,
        };
        assert_eq!(parse_task_input(input), expected);
    }

    #[test]
    fn test_parse_keeps_zero_and_oversized_durations() {
        let result = parse_task_input("Nap ~0 @10:00");
        assert_eq!(result.title, "Nap");
        assert_eq!(result.duration, Some(Ok(0)));

        let result = parse_task_input("Nap ~99999999999 @10:00");
        assert_eq!(result.title, "Nap");
        assert_eq!(result.duration, Some(Err("99999999999".to_string())));
    }

    #[test]
    fn test_parse_duration_needs_word_boundary() {
        let input = "Stretch ~20minutes";
        let expected = ParsedTask {
            title: "Stretch ~20minutes".to_string(),
            time: None,
            duration: None,
            category: None,
        };
        assert_eq!(parse_task_input(input), expected);
        assert_eq!(parse_task_input("Stretch ~20m").duration, Some(Ok(20)));
    }
}
