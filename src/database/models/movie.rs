use serde::{de, Deserialize, Deserializer, Serialize};

use super::{Resource, ValidationError};

pub const MIN_RELEASE_YEAR: i32 = 1900;
pub const MAX_RELEASE_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Mystery,
    Thriller,
    Western,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
}

/// Fields not listed here are dropped on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    #[serde(
        default,
        deserialize_with = "deserialize_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Urlencoded bodies carry every value as a string
#[derive(Deserialize)]
#[serde(untagged)]
enum YearInput {
    Number(i32),
    Text(String),
}

/// Accepts `1995` or `"1995"`; an empty string counts as absent
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearInput::Number(year)) => Ok(Some(year)),
        Some(YearInput::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(YearInput::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("releaseDate '{}' is not a year", text))),
    }
}

impl Resource for Movie {
    const NAME: &'static str = "Movie";
    const COLLECTION: &'static str = "movies";

    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::new("Movie validation failed");

        if self.title.trim().is_empty() {
            err = err.with_field("title", "Path `title` is required.");
        }

        match self.release_date {
            Some(year) if year < MIN_RELEASE_YEAR => {
                err = err.with_field("releaseDate", "Must be greater than 1899");
            }
            Some(year) if year > MAX_RELEASE_YEAR => {
                err = err.with_field("releaseDate", "Must be less than 2100");
            }
            _ => {}
        }

        if err.field_errors.is_empty() {
            Ok(())
        } else {
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::decode;
    use serde_json::json;

    #[test]
    fn decodes_full_movie() {
        let movie: Movie = decode(json!({
            "title": "Dune",
            "releaseDate": 2021,
            "genre": "Science Fiction",
            "actors": [{ "actorName": "T. Chalamet", "characterName": "Paul" }],
            "imageUrl": "https://example.com/dune.jpg"
        }))
        .unwrap();

        assert_eq!(movie.genre, Some(Genre::ScienceFiction));
        assert_eq!(movie.actors[0].character_name.as_deref(), Some("Paul"));
    }

    #[test]
    fn release_year_bounds_are_inclusive() {
        assert!(decode::<Movie>(json!({ "title": "A", "releaseDate": 1900 })).is_ok());
        assert!(decode::<Movie>(json!({ "title": "A", "releaseDate": 2100 })).is_ok());

        let err = decode::<Movie>(json!({ "title": "A", "releaseDate": 2101 })).unwrap_err();
        assert_eq!(err.field_errors["releaseDate"], "Must be less than 2100");
    }

    #[test]
    fn rejects_unknown_genre_and_missing_title() {
        assert!(decode::<Movie>(json!({ "title": "A", "genre": "Musical" })).is_err());
        assert!(decode::<Movie>(json!({ "releaseDate": 2000 })).is_err());

        let err = decode::<Movie>(json!({ "title": "   " })).unwrap_err();
        assert!(err.field_errors.contains_key("title"));
    }

    #[test]
    fn release_year_accepts_numeric_strings() {
        let movie: Movie = decode(json!({ "title": "Heat", "releaseDate": "1995" })).unwrap();
        assert_eq!(movie.release_date, Some(1995));

        let movie: Movie = decode(json!({ "title": "Heat", "releaseDate": "" })).unwrap();
        assert_eq!(movie.release_date, None);

        assert!(decode::<Movie>(json!({ "title": "Heat", "releaseDate": "mid-nineties" })).is_err());

        let err = decode::<Movie>(json!({ "title": "Heat", "releaseDate": "2150" })).unwrap_err();
        assert_eq!(err.field_errors["releaseDate"], "Must be less than 2100");
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let movie: Movie = decode(json!({ "title": "A", "rating": 5 })).unwrap();
        let value = serde_json::to_value(&movie).unwrap();
        assert!(value.get("rating").is_none());
        assert_eq!(value["actors"], json!([]));
    }
}
