//! Declarative form definitions for the venue, artist and show pages.
//!
//! Every form is described by a static list of [`Field`]s, each carrying the
//! validators applied to the submitted value. Parsing a submission first runs
//! the validators over the raw key/value pairs and only then builds the typed
//! form, so handlers never see an invalid value.

use serde::Serialize;
use std::collections::BTreeMap;
use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    OffsetDateTime, PrimitiveDateTime,
};

use base::util::whole_seconds;

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Heavy Metal",
    "Hip-Hop",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Other",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
];

pub const STATES: &[&str] = &[
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN",
    "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ",
    "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA",
    "WI", "WV", "WY",
];

const DATETIME_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];

const DISPLAY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "choices")]
pub enum Validator {
    DataRequired,
    /// Every submitted value must be one of the choices.
    AnyOf(&'static [&'static str]),
    /// http(s) URL, empty values are accepted.
    Url,
    Integer,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub validators: &'static [Validator],
}

pub static VENUE_FIELDS: &[Field] = &[
    Field {
        name: "name",
        validators: &[Validator::DataRequired],
    },
    Field {
        name: "city",
        validators: &[Validator::DataRequired],
    },
    Field {
        name: "state",
        validators: &[Validator::DataRequired, Validator::AnyOf(STATES)],
    },
    Field {
        name: "address",
        validators: &[Validator::DataRequired],
    },
    Field {
        name: "phone",
        validators: &[],
    },
    Field {
        name: "image_link",
        validators: &[],
    },
    Field {
        name: "genres",
        validators: &[Validator::DataRequired, Validator::AnyOf(GENRES)],
    },
    Field {
        name: "facebook_link",
        validators: &[Validator::Url],
    },
    Field {
        name: "website",
        validators: &[Validator::Url],
    },
    Field {
        name: "seeking_talent",
        validators: &[],
    },
    Field {
        name: "seeking_description",
        validators: &[],
    },
];

pub static ARTIST_FIELDS: &[Field] = &[
    Field {
        name: "name",
        validators: &[Validator::DataRequired],
    },
    Field {
        name: "city",
        validators: &[Validator::DataRequired],
    },
    Field {
        name: "state",
        validators: &[Validator::DataRequired, Validator::AnyOf(STATES)],
    },
    Field {
        name: "phone",
        validators: &[],
    },
    Field {
        name: "image_link",
        validators: &[],
    },
    Field {
        name: "genres",
        validators: &[Validator::DataRequired, Validator::AnyOf(GENRES)],
    },
    Field {
        name: "facebook_link",
        validators: &[Validator::Url],
    },
    Field {
        name: "website",
        validators: &[Validator::Url],
    },
    Field {
        name: "seeking_venue",
        validators: &[],
    },
    Field {
        name: "seeking_description",
        validators: &[],
    },
];

pub static SHOW_FIELDS: &[Field] = &[
    Field {
        name: "artist_id",
        validators: &[Validator::DataRequired, Validator::Integer],
    },
    Field {
        name: "venue_id",
        validators: &[Validator::DataRequired, Validator::Integer],
    },
    Field {
        name: "start_time",
        validators: &[Validator::DataRequired, Validator::DateTime],
    },
];

/// Raw `application/x-www-form-urlencoded` submission. Keys may repeat for
/// multi-valued fields.
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value submitted for `key`, trimmed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
    }

    /// Every non-empty value submitted for `key`, in submission order.
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_owned())
            .collect()
    }

    fn text(&self, key: &str) -> String {
        self.optional(key).unwrap_or_default()
    }

    fn optional(&self, key: &str) -> Option<String> {
        self.get_all(key).into_iter().next()
    }

    /// Converts the first value `validate` looked at, reporting `key` when
    /// the conversion fails.
    fn typed<T, F>(
        &self,
        key: &'static str,
        convert: F,
        errors: &mut ValidationErrors,
    ) -> Option<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        let value = self.get_all(key).first().and_then(|v| convert(v.as_str()));
        if value.is_none() {
            errors.push(key, "Not a valid value.");
        }
        value
    }

    fn checkbox(&self, key: &str) -> bool {
        match self.get(key) {
            None => false,
            Some(v) => !matches!(
                v.to_ascii_lowercase().as_str(),
                "" | "false" | "n" | "no" | "off" | "0"
            ),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<&'static str>>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> &[&'static str] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_default().push(message);
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self.0.keys().copied().collect::<Vec<_>>().join(", ");
        write!(f, "invalid fields: {}", fields)
    }
}

pub fn parse_datetime(value: &str) -> Option<OffsetDateTime> {
    if let Ok(t) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(whole_seconds(t));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(value, *format).ok())
        .map(|t| whole_seconds(t.assume_utc()))
}

pub fn format_datetime(value: OffsetDateTime) -> String {
    value
        .format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}

fn is_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}

fn check(validator: &Validator, values: &[String]) -> Option<&'static str> {
    match validator {
        Validator::DataRequired => values
            .is_empty()
            .then_some("This field is required."),
        Validator::AnyOf(choices) => values
            .iter()
            .any(|v| !choices.contains(&v.as_str()))
            .then_some("Not a valid choice."),
        Validator::Url => values
            .iter()
            .any(|v| !is_url(v))
            .then_some("Invalid URL."),
        Validator::Integer => values
            .iter()
            .any(|v| v.parse::<i32>().is_err())
            .then_some("Not a valid integer value."),
        Validator::DateTime => values
            .iter()
            .any(|v| parse_datetime(v).is_none())
            .then_some("Not a valid datetime value."),
    }
}

pub fn validate(data: &FormData, fields: &[Field]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for field in fields {
        let values = data.get_all(field.name);
        for validator in field.validators {
            if let Some(message) = check(validator, &values) {
                errors.push(field.name, message);
                // nothing left to check
                if *validator == Validator::DataRequired {
                    break;
                }
            }
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn parse(data: &FormData) -> Result<Self, ValidationErrors> {
        validate(data, VENUE_FIELDS)?;
        Ok(Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            address: data.text("address"),
            phone: data.optional("phone"),
            image_link: data.optional("image_link"),
            genres: data.get_all("genres"),
            facebook_link: data.optional("facebook_link"),
            website: data.optional("website"),
            seeking_talent: data.checkbox("seeking_talent"),
            seeking_description: data.optional("seeking_description"),
        })
    }

    pub fn populated(venue: &entity::Venue, genres: Vec<String>) -> Self {
        Self {
            name: venue.name.to_owned(),
            city: venue.city.to_owned(),
            state: venue.state.to_owned(),
            address: venue.address.to_owned(),
            phone: venue.phone.to_owned(),
            image_link: venue.image_link.to_owned(),
            genres,
            facebook_link: venue.facebook_link.to_owned(),
            website: venue.website.to_owned(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn parse(data: &FormData) -> Result<Self, ValidationErrors> {
        validate(data, ARTIST_FIELDS)?;
        Ok(Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            phone: data.optional("phone"),
            image_link: data.optional("image_link"),
            genres: data.get_all("genres"),
            facebook_link: data.optional("facebook_link"),
            website: data.optional("website"),
            seeking_venue: data.checkbox("seeking_venue"),
            seeking_description: data.optional("seeking_description"),
        })
    }

    pub fn populated(artist: &entity::Artist, genres: Vec<String>) -> Self {
        Self {
            name: artist.name.to_owned(),
            city: artist.city.to_owned(),
            state: artist.state.to_owned(),
            phone: artist.phone.to_owned(),
            image_link: artist.image_link.to_owned(),
            genres,
            facebook_link: artist.facebook_link.to_owned(),
            website: artist.website.to_owned(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
}

impl ShowForm {
    pub fn parse(data: &FormData) -> Result<Self, ValidationErrors> {
        validate(data, SHOW_FIELDS)?;
        let mut errors = ValidationErrors::default();
        let artist_id = data.typed("artist_id", |v| v.parse().ok(), &mut errors);
        let venue_id = data.typed("venue_id", |v| v.parse().ok(), &mut errors);
        let start_time = data.typed("start_time", parse_datetime, &mut errors);
        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Ok(Self {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

/// Values the empty show form is pre-filled with.
#[derive(Debug, Clone, Serialize)]
pub struct ShowFormDefaults {
    pub start_time: String,
}

impl ShowFormDefaults {
    pub fn at(now: OffsetDateTime) -> Self {
        Self {
            start_time: format_datetime(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn venue_data() -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", ""),
            ("genres", "Jazz"),
            ("genres", "Reggae"),
            ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
            ("website", ""),
            ("seeking_talent", "y"),
        ]
    }

    #[test]
    fn venue_form_parses_multi_valued_genres() {
        let data: FormData = venue_data().into_iter().collect();
        let form = VenueForm::parse(&data).unwrap();
        assert_eq!(form.name, "The Musical Hop");
        assert_eq!(form.genres, vec!["Jazz", "Reggae"]);
        assert_eq!(form.phone, None);
        assert_eq!(form.website, None);
        assert!(form.seeking_talent);
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let data: FormData = venue_data()
            .into_iter()
            .filter(|(k, _)| *k != "name" && *k != "genres")
            .collect();
        let errors = VenueForm::parse(&data).unwrap_err();
        assert_eq!(errors.field("name"), ["This field is required."]);
        assert_eq!(errors.field("genres"), ["This field is required."]);
        assert!(errors.field("city").is_empty());
    }

    #[test]
    fn choices_and_urls_are_checked() {
        let data: FormData = venue_data()
            .into_iter()
            .map(|(k, v)| match k {
                "state" => (k, "XX"),
                "facebook_link" => (k, "not a url"),
                _ => (k, v),
            })
            .chain([("genres", "Polka")])
            .collect();
        let errors = VenueForm::parse(&data).unwrap_err();
        assert_eq!(errors.field("state"), ["Not a valid choice."]);
        assert_eq!(errors.field("genres"), ["Not a valid choice."]);
        assert_eq!(errors.field("facebook_link"), ["Invalid URL."]);
    }

    #[test]
    fn unchecked_checkbox_is_false() {
        let data: FormData = venue_data()
            .into_iter()
            .filter(|(k, _)| *k != "seeking_talent")
            .collect();
        assert!(!VenueForm::parse(&data).unwrap().seeking_talent);

        let data: FormData = venue_data()
            .into_iter()
            .map(|(k, v)| if k == "seeking_talent" { (k, "off") } else { (k, v) })
            .collect();
        assert!(!VenueForm::parse(&data).unwrap().seeking_talent);
    }

    #[test]
    fn artist_form_ignores_address() {
        let data: FormData = [
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "Rock n Roll"),
            ("seeking_venue", "y"),
        ]
        .into_iter()
        .collect();
        let form = ArtistForm::parse(&data).unwrap();
        assert_eq!(form.genres, vec!["Rock n Roll"]);
        assert!(form.seeking_venue);
    }

    #[test]
    fn show_form_accepts_common_datetime_formats() {
        for value in [
            "2035-04-01 20:00:00",
            "2035-04-01T20:00",
            "2035-04-01T20:00:00Z",
            "2035-04-01T22:00:00+02:00",
        ] {
            let data: FormData = [
                ("artist_id", "4"),
                ("venue_id", "1"),
                ("start_time", value),
            ]
            .into_iter()
            .collect();
            let form = ShowForm::parse(&data).unwrap();
            assert_eq!(form.start_time, datetime!(2035-04-01 20:00 UTC), "{}", value);
        }
    }

    #[test]
    fn show_form_rejects_bad_values() {
        let data: FormData = [
            ("artist_id", "four"),
            ("venue_id", ""),
            ("start_time", "tomorrow"),
        ]
        .into_iter()
        .collect();
        let errors = ShowForm::parse(&data).unwrap_err();
        assert_eq!(errors.field("artist_id"), ["Not a valid integer value."]);
        assert_eq!(errors.field("venue_id"), ["This field is required."]);
        assert_eq!(errors.field("start_time"), ["Not a valid datetime value."]);
    }

    #[test]
    fn show_form_reads_the_first_non_empty_value() {
        let data: FormData = [
            ("artist_id", ""),
            ("artist_id", "3"),
            ("venue_id", "1"),
            ("start_time", "2035-04-01 20:00:00"),
        ]
        .into_iter()
        .collect();
        let form = ShowForm::parse(&data).unwrap();
        assert_eq!(form.artist_id, 3);
        assert_eq!(form.venue_id, 1);
    }

    #[test]
    fn default_start_time_is_formatted() {
        let defaults = ShowFormDefaults::at(datetime!(2024-06-01 12:30:05 UTC));
        assert_eq!(defaults.start_time, "2024-06-01 12:30:05");
    }
}
