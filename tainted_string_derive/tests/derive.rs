use tainted_string::{TaintVariant, TaintedString, Variant};

#[derive(TaintVariant)]
struct CustomerComment;

#[derive(TaintVariant)]
#[variant(name = "session token")]
struct SessionToken;

#[test]
fn the_diagnostic_name_defaults_to_the_identifier() {
    assert_eq!(CustomerComment::NAME, "CustomerComment");
}

#[test]
fn the_diagnostic_name_can_be_overridden() {
    assert_eq!(SessionToken::NAME, "session token");
}

#[test]
fn derived_variants_parameterize_the_scalar() {
    let comment: TaintedString<CustomerComment> = TaintedString::wrap("first post");
    let token: TaintedString<SessionToken> = TaintedString::wrap("abc123");
    assert_eq!(comment.len(), 10);
    assert!(token.contains("abc"));
}
