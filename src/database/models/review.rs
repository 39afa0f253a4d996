use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Resource;

/// Reviews carry no schema; any JSON object is stored as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Review(pub Map<String, Value>);

impl Resource for Review {
    const NAME: &'static str = "Review";
    const COLLECTION: &'static str = "reviews";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::decode;
    use serde_json::json;

    #[test]
    fn any_object_is_a_review() {
        let review: Review = decode(json!({ "quote": "Loved it", "rating": 5 })).unwrap();
        assert_eq!(review.0["rating"], 5);
    }

    #[test]
    fn scalars_are_not_reviews() {
        assert!(decode::<Review>(json!("great")).is_err());
    }
}
