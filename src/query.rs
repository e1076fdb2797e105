//! The "on this day" query sent to Wikidata.
use chrono::{Datelike, NaiveDate};

/// `wd:Q1190554`, "occurrence": the class every matched entity must (transitively) belong to.
pub const OCCURRENCE: &str = "wd:Q1190554";

/// Maximum number of rows the endpoint is asked for.
pub const LIMIT: usize = 5;

/// Historical events whose point in time (`wdt:P585`) falls on the month and day of `day`.
///
/// The year of `day` is ignored.
pub fn on_this_day(day: NaiveDate) -> String {
    format!(
        r#"
    SELECT ?entity ?entityLabel ?date WHERE {{
      ?entity wdt:P31/wdt:P279* {occurrence}.
      ?entity wdt:P585 ?date.
      FILTER(MONTH(?date) = {month} && DAY(?date) = {day})
      SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
    }}
    LIMIT {limit}
    "#,
        occurrence = OCCURRENCE,
        month = day.month(),
        day = day.day(),
        limit = LIMIT,
    )
}
