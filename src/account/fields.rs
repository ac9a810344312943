//! Help text for the account form fields.
//!
//! One line per field, shown next to the input the operator is filling in.

use phf::phf_map;

/// Form fields in display order.
pub const FIELDS: [&str; 12] = [
    "id",
    "followers_count",
    "friends_count",
    "listed_count",
    "favourites_count",
    "statuses_count",
    "default_profile",
    "default_profile_image",
    "verified",
    "protected",
    "geo_enabled",
    "contributors_enabled",
];

/// Field name → help text
pub static FIELD_HELP: phf::Map<&'static str, &'static str> = phf_map! {
    "id" => "The unique identifier for the social media account (usually a username)",
    "followers_count" => "The number of accounts that follow this account",
    "friends_count" => "The number of accounts this account is following",
    "listed_count" => "The number of lists that include this account(mention or tagged)",
    "favourites_count" => "The number of posts this account has marked as favorite/liked",
    "statuses_count" => "The total number of posts/updates made by this account(social activity)",
    "default_profile" => "Whether the account is using a default theme/layout provided by the platform(no bio)",
    "default_profile_image" => "Whether the account is using a default profile picture rather than a custom one(no pfp)",
    "verified" => "Whether the account has been verified by the platform",
    "protected" => "Whether the account has privacy protections enabled(private account)",
    "geo_enabled" => "Whether the account has location services enabled",
    "contributors_enabled" => "Whether the account allows multiple contributors to post from it",
};

/// Help text for a field, if it is a known form field.
pub fn describe(field: &str) -> Option<&'static str> {
    FIELD_HELP.get(field).copied()
}

/// Whether `field` is one of the form fields.
pub fn is_known_field(field: &str) -> bool {
    FIELD_HELP.contains_key(field)
}

/// All fields paired with their help text, in display order.
pub fn field_help() -> impl Iterator<Item = (&'static str, &'static str)> {
    FIELDS
        .iter()
        .filter_map(|name| describe(name).map(|help| (*name, help)))
}
