//! Template substitution through both channels: tainted templates accept
//! anything and keep their variant; the trusted channel refuses tainted
//! arguments, values and mappings before producing any output.

use std::collections::HashMap;

use tainted_string::{
    trusted_format, trusted_format_map, wrap, TaintError, TaintVariant, TaintedMapping,
    TaintedString, TemplateArgs,
};

#[derive(TaintVariant)]
struct CustomerName;

fn custom(text: &str) -> TaintedString<CustomerName> {
    TaintedString::wrap(text)
}

#[test]
fn positional_substitution() {
    let args = TemplateArgs::new().arg("Sarah").arg(123);
    let line = wrap("Hello {0}, UserID: {1}").format(&args).expect("render");
    assert_eq!(line, wrap("Hello Sarah, UserID: 123"));
}

#[test]
fn auto_numbered_substitution() {
    let args = TemplateArgs::new().arg("Sarah").arg(123);
    let line = wrap("Hello {}, UserID: {}").format(&args).expect("render");
    assert_eq!(line, wrap("Hello Sarah, UserID: 123"));
}

#[test]
fn named_substitution() {
    let args = TemplateArgs::new().named("name", "Sarah").named("uid", 123);
    let line = wrap("Hello {name}, UserID: {uid}").format(&args).expect("render");
    assert_eq!(line, wrap("Hello Sarah, UserID: 123"));
}

#[test]
fn tainted_arguments_are_accepted_and_the_template_variant_wins() {
    let args = TemplateArgs::new().arg(wrap("Sarah")).named("uid", custom("123"));
    let line = wrap("Hello {0}, UserID: {uid}").format(&args).expect("render");
    assert_eq!(line, wrap("Hello Sarah, UserID: 123"));

    let line = custom("Hello {0}").format(&TemplateArgs::new().arg(wrap("Sarah")));
    assert_eq!(line, Ok(custom("Hello Sarah")));
}

#[test]
fn missing_arguments_fail_without_partial_output() {
    let args = TemplateArgs::new().arg("Sarah");
    assert_eq!(wrap("Hello {0} {1}").format(&args), Err(TaintError::NoMatch));
    assert_eq!(wrap("Hello {name}").format(&args), Err(TaintError::NoMatch));
}

#[test]
fn malformed_templates_are_rejected() {
    let args = TemplateArgs::new().arg("a").arg("b");
    assert!(matches!(
        wrap("{0} and {}").format(&args),
        Err(TaintError::MalformedTemplate { .. })
    ));
    assert!(matches!(
        wrap("{0:>8}").format(&args),
        Err(TaintError::MalformedTemplate { .. })
    ));
    assert!(matches!(
        wrap("dangling {").format(&args),
        Err(TaintError::MalformedTemplate { .. })
    ));
}

#[test]
fn escaped_braces_render_literally() {
    let line = wrap("{{not a field}} {0}")
        .format(&TemplateArgs::new().arg("x"))
        .expect("render");
    assert_eq!(line, wrap("{not a field} x"));
}

#[test]
fn format_map_from_a_plain_map() {
    let mut values = HashMap::new();
    values.insert("name".to_string(), "Sarah".to_string());
    let line = wrap("Hello {name}").format_map(&values).expect("render");
    assert_eq!(line, wrap("Hello Sarah"));

    assert_eq!(wrap("Hello {uid}").format_map(&values), Err(TaintError::NoMatch));
}

#[test]
fn format_map_accepts_tainted_stored_values() {
    let mut values = HashMap::new();
    values.insert("name".to_string(), custom("Sarah"));
    let line = wrap("Hello {name}").format_map(&values).expect("render");
    assert_eq!(line, wrap("Hello Sarah"));
}

#[test]
fn format_map_accepts_a_tainted_mapping() {
    let mut raw = HashMap::new();
    raw.insert("name".to_string(), "Sarah".to_string());
    let mapping = TaintedMapping::<_, CustomerName>::new(&raw);
    let line = wrap("Hello {name}").format_map(&mapping).expect("render");
    assert_eq!(line, wrap("Hello Sarah"));
}

#[test]
fn trusted_format_accepts_only_trusted_arguments() {
    let ok = trusted_format(
        "Hello {0}, UserID: {uid}",
        &TemplateArgs::new().arg("Sarah").named("uid", 123),
    );
    assert_eq!(ok, Ok("Hello Sarah, UserID: 123".to_string()));

    let err = trusted_format("Hello {0}", &TemplateArgs::new().arg(wrap("Sarah")));
    assert!(matches!(err, Err(TaintError::TrustBoundary { .. })));

    let err = trusted_format("Hello {n}", &TemplateArgs::new().named("n", custom("Sarah")));
    assert!(matches!(err, Err(TaintError::TrustBoundary { .. })));
}

#[test]
fn trusted_format_rejects_unused_tainted_arguments_too() {
    // The tainted argument never appears in the output, but supplying it
    // to the trusted channel is already the violation.
    let args = TemplateArgs::new().arg("ok").named("unused", wrap("boo"));
    let err = trusted_format("Hello {0}", &args);
    assert!(matches!(err, Err(TaintError::TrustBoundary { .. })));
}

#[test]
fn trusted_format_map_rejects_tainted_values_and_mappings() {
    let mut raw = HashMap::new();
    raw.insert("name".to_string(), "Sarah".to_string());
    assert_eq!(
        trusted_format_map("Hello {name}", &raw),
        Ok("Hello Sarah".to_string())
    );

    let mut stored_tainted = HashMap::new();
    stored_tainted.insert("name".to_string(), wrap("Sarah"));
    let err = trusted_format_map("Hello {name}", &stored_tainted);
    assert!(matches!(err, Err(TaintError::TrustBoundary { .. })));

    let mapping = TaintedMapping::<_, CustomerName>::new(&raw);
    let err = trusted_format_map("Hello {name}", &mapping);
    assert!(matches!(err, Err(TaintError::TrustBoundary { .. })));
}
