use sitepipe::tasks::minify::minify_css;

#[test]
fn strips_comments_and_collapses_whitespace() {
    let input = "/* banner */\nbody {\n    margin: 0;\n    padding: 0;\n}\n";
    assert_eq!(minify_css(input), "body{margin:0;padding:0}");
}

#[test]
fn drops_semicolon_before_closing_brace() {
    assert_eq!(minify_css("a { color: red; }"), "a{color:red}");
}

#[test]
fn keeps_significant_spaces_between_tokens() {
    // Descendant combinator and multi-part values keep one space.
    assert_eq!(
        minify_css("ul  li { margin: 0 auto; }"),
        "ul li{margin:0 auto}"
    );
}

#[test]
fn media_query_prelude_keeps_required_spaces() {
    // `and(` lexes as a function token, so the space before `(` must stay.
    assert_eq!(
        minify_css("@media screen and (min-width: 100px) { a { color: red; } }"),
        "@media screen and (min-width:100px){a{color:red}}"
    );
}

#[test]
fn space_between_media_conditions_survives() {
    assert_eq!(
        minify_css("@media (min-width: 10px) and (max-width: 20px) { a { color: red } }"),
        "@media (min-width:10px) and (max-width:20px){a{color:red}}"
    );
}

#[test]
fn descendant_pseudo_class_selector_keeps_its_space() {
    // `ul :hover` matches descendants of `ul`; `ul:hover` matches `ul` itself.
    assert_eq!(minify_css("ul :hover { color: red; }"), "ul :hover{color:red}");
}

#[test]
fn leaves_string_literals_intact() {
    assert_eq!(
        minify_css("a::before { content: \"  hi  \"; }"),
        "a::before{content:\"  hi  \"}"
    );
}

#[test]
fn comment_inside_value_acts_as_separator() {
    assert_eq!(minify_css("a { margin: 0/* gap */auto; }"), "a{margin:0 auto}");
}

#[test]
fn minification_is_a_fixed_point() {
    let input = "/* c */ a > b { color: red; }\n.x , .y { border: 1px  solid  black; }";
    let once = minify_css(input);
    assert_eq!(minify_css(&once), once);
}

#[test]
fn unterminated_comment_swallows_the_rest() {
    assert_eq!(minify_css("a{color:red}/* trailing"), "a{color:red}");
}
