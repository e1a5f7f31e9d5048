//! Questions and validation rules for the local strategies

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::ConfigFields;
use crate::prompt::{Question, Validator};

static ORG_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("organization key pattern is valid"));

static CLIENT_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("client id pattern is valid")
});

static API_SECRET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{64}$").expect("api secret pattern is valid"));

const CLIENT_ID_HINT: &str =
    "A client ID is a sequence of numbers and letters separated by dashes, 36 characters long.";

/// Questions for the local mailbox strategies
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFields;

fn nickname(message: &str, hint: &str) -> Question {
    Question::input("name", message).validate(Validator::non_empty(hint))
}

impl ConfigFields for LocalFields {
    fn org_fields(&self) -> Vec<Question> {
        vec![
            Question::input("key", "Organization Token:").validate(Validator::pattern(
                &ORG_KEY,
                "A token may only contain letters, numbers, '-' and '_'.",
            )),
            nickname(
                "Organization Name (for local use):",
                "Please enter an organization name.",
            ),
        ]
    }

    fn new_user_fields(&self) -> Vec<Question> {
        vec![nickname("User Nickname:", "Please enter a user nickname.")]
    }

    fn existing_user_fields(&self) -> Vec<Question> {
        vec![
            Question::input("key", "Client ID:")
                .validate(Validator::pattern(&CLIENT_ID, CLIENT_ID_HINT)),
            Question::input("api_secret", "API Secret:").validate(Validator::pattern(
                &API_SECRET,
                "An API secret will be 64 characters long.",
            )),
            nickname("User Nickname:", "Please enter a user nickname."),
        ]
    }

    fn friend_fields(&self) -> Vec<Question> {
        vec![
            Question::input("key", "Client ID:")
                .validate(Validator::pattern(&CLIENT_ID, CLIENT_ID_HINT)),
            nickname(
                "Friend's Nickname (for local use):",
                "Please enter a nickname for this friend.",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Answer;

    #[test]
    fn test_org_key_rejects_dots() {
        let key = &LocalFields.org_fields()[0];
        assert!(key.check(&Answer::from("acme-corp_1")).is_ok());
        assert!(key.check(&Answer::from("acme.corp")).is_err());
    }

    #[test]
    fn test_friend_requires_client_id() {
        let fields = LocalFields.friend_fields();
        assert!(fields[0]
            .check(&Answer::from("0f8fad5b-d9cb-469f-a165-70867728950e"))
            .is_ok());
        assert!(fields[0].check(&Answer::from("bob")).is_err());
        assert!(fields[1].check(&Answer::from("")).is_err());
    }

    #[test]
    fn test_existing_user_asks_for_credentials() {
        let names: Vec<String> = LocalFields
            .existing_user_fields()
            .into_iter()
            .map(|q| q.name)
            .collect();
        assert_eq!(names, vec!["key", "api_secret", "name"]);
    }
}
