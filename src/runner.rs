use crate::report::{self, ResultRow};
use crate::{query, Error, SparqlClient, SparqlEndpoint};
use chrono::NaiveDate;
use log::{debug, info};
use std::io::{self, Write};

/// Looks up what happened on a given day and reports it.
pub struct QueryRunner<E = SparqlClient> {
    endpoint: E,
    day: NaiveDate,
}

impl<E: SparqlEndpoint> QueryRunner<E> {
    pub fn new(endpoint: E, day: NaiveDate) -> Self {
        Self { endpoint, day }
    }

    /// The SPARQL text sent by [`fetch`](Self::fetch).
    pub fn query(&self) -> String {
        query::on_this_day(self.day)
    }

    /// Send the query and return the rows in the order the endpoint produced them.
    pub fn fetch(&self) -> Result<Vec<ResultRow>, Error> {
        let doc = self.endpoint.select(&self.query())?;
        info!(
            "{} result(s) for {}",
            doc.len(),
            self.day.format("%B %-d")
        );
        Ok(doc.rows())
    }

    /// [`fetch`](Self::fetch), then print either the rows or a single `Error:` line to `out`.
    ///
    /// A failed fetch is reported, not returned; only a failure to write to `out` is.
    pub fn run<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.fetch() {
            Ok(rows) => report::write_rows(out, &rows),
            Err(err) => {
                debug!("fetch failed: {:?}", err);
                report::write_error(out, &err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BindingsDocument;
    use std::cell::RefCell;

    /// Answers every query with a canned body and remembers what it was asked.
    struct Canned {
        body: Result<&'static str, io::ErrorKind>,
        seen: RefCell<Vec<String>>,
    }

    impl Canned {
        fn body(body: &'static str) -> Self {
            Canned {
                body: Ok(body),
                seen: RefCell::new(vec![]),
            }
        }

        fn failing(kind: io::ErrorKind) -> Self {
            Canned {
                body: Err(kind),
                seen: RefCell::new(vec![]),
            }
        }
    }

    impl SparqlEndpoint for Canned {
        fn select(&self, query: &str) -> Result<BindingsDocument, Error> {
            self.seen.borrow_mut().push(query.to_string());
            match self.body {
                Ok(body) => Ok(serde_json::from_str(body)?),
                Err(kind) => Err(io::Error::new(kind, "connection refused").into()),
            }
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn output(endpoint: &Canned) -> String {
        let mut buf = Vec::new();
        QueryRunner::new(endpoint, day()).run(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn prints_mock_response() {
        let endpoint = Canned::body(
            r#"{"results":{"bindings":[{"entityLabel":{"value":"Battle of X"},"date":{"value":"2024-01-01T00:00:00Z"}}]}}"#,
        );
        assert_eq!(
            output(&endpoint),
            "Successfully fetched data!\nLabel: Battle of X\nDate: 2024-01-01T00:00:00Z\n---\n"
        );
    }

    #[test]
    fn sends_query_for_its_day() {
        let endpoint = Canned::body(r#"{"results":{"bindings":[]}}"#);
        let runner = QueryRunner::new(&endpoint, day());
        runner.fetch().unwrap();
        let seen = endpoint.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], runner.query());
        assert!(seen[0].contains("MONTH(?date) = 1 && DAY(?date) = 1"));
    }

    #[test]
    fn five_rows_in_order() {
        let endpoint = Canned::body(
            r#"{"results":{"bindings":[
                {"entityLabel":{"value":"a"},"date":{"value":"1"}},
                {"entityLabel":{"value":"b"}},
                {"date":{"value":"3"}},
                {},
                {"entityLabel":{"value":"e"},"date":{"value":"5"}}
            ]}}"#,
        );
        let out = output(&endpoint);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1 + 5 * 3);
        assert_eq!(lines[0], "Successfully fetched data!");
        assert_eq!(
            &lines[1..],
            &[
                "Label: a", "Date: 1", "---",
                "Label: b", "Date: None", "---",
                "Label: None", "Date: 3", "---",
                "Label: None", "Date: None", "---",
                "Label: e", "Date: 5", "---",
            ]
        );
    }

    #[test]
    fn empty_bindings() {
        let endpoint = Canned::body(r#"{"head":{"vars":["entity","entityLabel","date"]},"results":{"bindings":[]}}"#);
        assert_eq!(output(&endpoint), "Successfully fetched data!\n");
    }

    #[test]
    fn invalid_json_prints_error_only() {
        let endpoint = Canned::body("not json");
        let out = output(&endpoint);
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("Error: "), "{}", out);
    }

    #[test]
    fn missing_results_prints_error_only() {
        let endpoint = Canned::body(r#"{"head":{"vars":[]}}"#);
        let out = output(&endpoint);
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("Error: "), "{}", out);
    }

    #[test]
    fn network_failure_prints_error_only() {
        let endpoint = Canned::failing(io::ErrorKind::ConnectionRefused);
        assert_eq!(output(&endpoint), "Error: i/o error: connection refused\n");
        assert!(matches!(
            QueryRunner::new(&endpoint, day()).fetch(),
            Err(Error::Io(_))
        ));
    }
}
