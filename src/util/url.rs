/// Returns true if `s` parses as an absolute URL. Any scheme is accepted.
pub fn is_valid_url(s: &str) -> bool {
    ::url::Url::parse(s).is_ok()
}
