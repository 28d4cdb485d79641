use crate::util::Error;
use std::borrow::Cow;

/// A pattern that locates a JSON object embedded in a page
///
/// The pattern must have an `object` capture group. If the group only covers the
/// members of the object (the braces are part of the anchors), use [`Anchor::members`]
/// so the braces are put back before parsing.
#[derive(Debug)]
pub struct Anchor {
    re: regex::Regex,
    wrap: bool,
    missing: &'static str,
}

impl Anchor {
    /// The `object` group captures a whole object, braces included
    pub fn object(pattern: &str, missing: &'static str) -> Self {
        Self::new(pattern, false, missing)
    }

    /// The `object` group captures only what is between the braces
    pub fn members(pattern: &str, missing: &'static str) -> Self {
        Self::new(pattern, true, missing)
    }

    fn new(pattern: &str, wrap: bool, missing: &'static str) -> Self {
        let re = regex::Regex::new(pattern).expect("valid anchor pattern");
        assert!(
            re.capture_names().flatten().any(|name| name == "object"),
            "anchor pattern needs an 'object' group"
        );
        Self { re, wrap, missing }
    }

    /// Find the first embedded object in the body
    pub fn find<'a>(&self, body: &'a str) -> Option<Cow<'a, str>> {
        let found = self.re.captures(body)?.name("object")?.as_str();
        if self.wrap {
            Some(Cow::Owned(format!("{{{}}}", found)))
        } else {
            Some(Cow::Borrowed(found))
        }
    }

    /// Find the embedded object and parse it as JSON
    ///
    /// A missing object is an [`Error::Extraction`], invalid JSON is reported as is
    pub fn parse(&self, body: &str) -> anyhow::Result<serde_json::Value> {
        let object = self
            .find(body)
            .ok_or_else(|| Error::Extraction(self.missing))?;
        serde_json::from_str(&object).map_err(Into::into)
    }

    /// The error reported when the object isn't there
    pub fn missing(&self) -> Error {
        Error::Extraction(self.missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Anchor {
        Anchor::object(r"_ROUTER_DATA\s*=\s*(?P<object>\{.*?\})<", "nothing here")
    }

    fn photo() -> Anchor {
        Anchor::members(
            r#""photo":\s*\{(?P<object>.*?)\},\s*"serialInfo""#,
            "no photo",
        )
    }

    #[test]
    fn find_object() {
        let body = r#"<script>window._ROUTER_DATA = {"a":{"b":1}}</script>"#;
        assert_eq!(router().find(body).unwrap(), r#"{"a":{"b":1}}"#);

        let body = r#"<script>window._ROUTER_DATA={"a":1}</script><p>{"x":2}</p>"#;
        assert_eq!(router().find(body).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn find_members() {
        let body = r#"{"photo": {"caption":"hi","manifest":{"videoId":"v"}}, "serialInfo": {}}"#;
        assert_eq!(
            photo().find(body).unwrap(),
            r#"{"caption":"hi","manifest":{"videoId":"v"}}"#
        );
    }

    #[test]
    fn missing() {
        let err = router().parse("<html></html>").unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::Extraction("nothing here"))
        );
        assert_eq!(err.to_string(), "nothing here");
    }

    #[test]
    fn invalid_json() {
        let err = photo()
            .parse(r#""photo": {"caption": }, "serialInfo""#)
            .unwrap_err();
        assert!(err.downcast_ref::<Error>().is_none());
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }
}
