//! Question schemas a storage strategy needs answered

use crate::prompt::Question;

/// The questions asked when adding organizations, users, and friends
///
/// Each storage strategy knows which values its backend needs; routes only
/// hand the questions to the prompter and pass the answers along.
pub trait ConfigFields: Send + Sync {
    /// Fields for registering a new organization
    fn org_fields(&self) -> Vec<Question>;

    /// Fields for creating a brand new user on the backend
    fn new_user_fields(&self) -> Vec<Question>;

    /// Fields for importing a user that already exists on the backend
    fn existing_user_fields(&self) -> Vec<Question>;

    /// Fields for adding a friend to share with
    fn friend_fields(&self) -> Vec<Question>;
}
