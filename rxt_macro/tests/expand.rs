use rxt_macro::translate_regexp;

const KEY: &str = translate_regexp!("^{key}[ \t]*=", key = "user.name");

#[test]
fn plain_pattern() {
    assert_eq!(translate_regexp!("(ab)+[:digit:]"), r"(?:ab)+\p{Digit}");
}

#[test]
fn usable_in_const() {
    assert_eq!(KEY, r"^(?:\Quser.name\E)[ \t]*=");
}

#[test]
fn string_token_names() {
    assert_eq!(translate_regexp!("{my-token}?", "my-token" = "x"), r"(?:\Qx\E)?");
}

#[test]
fn keyword_token_names() {
    assert_eq!(translate_regexp!("{type}", r#type = "int"), r"(?:\Qint\E)");
}

#[test]
fn trailing_comma() {
    assert_eq!(translate_regexp!("{a}{b}", a = "1", b = "2",), r"(?:\Q1\E)(?:\Q2\E)");
}

#[test]
fn empty_pattern() {
    assert_eq!(translate_regexp!(""), "");
}
