use crate::Lexer;

#[test]
fn lexemes() {
    let lexer = Lexer::from(
        "
        ... . > >> >>= >= < << <<= <=
        + += ++ - -= -- -> * *=
        / /= % %= & &= && ^ ^=
        | |= || = == ! != ; { } , :
        ( ) [ ] ~ ?
        static void identifier
    ",
    );

    let lexemes = lexer.spanned().lexemes();

    assert_eq!(
        lexemes.collect::<Vec<String>>(),
        vec![
            "...", ".", ">", ">>", ">>=", ">=", "<", "<<", "<<=", "<=",
            "+", "+=", "++", "-", "-=", "--", "->", "*", "*=", "/", "/=",
            "%", "%=", "&", "&=", "&&", "^", "^=", "|", "|=", "||", "=",
            "==", "!", "!=", ";", "{", "}", ",", ":", "(", ")", "[", "]",
            "~", "?", "static", "void", "identifier"
        ]
        .into_iter()
        .map(String::from)
        .collect::<Vec<String>>()
    );
}

#[test]
fn c11_keywords() {
    use crate::TokenTag::*;

    let tags: Vec<_> = Lexer::from(
        "_Bool _Complex _Atomic _Noreturn _Static_assert _Thread_local \
         _Alignof inline restrict",
    )
    .map(Result::unwrap)
    .collect();

    assert_eq!(
        tags,
        vec![
            Bool,
            Complex,
            Atomic,
            Noreturn,
            StaticAssert,
            ThreadLocal,
            Alignof,
            Inline,
            Restrict
        ]
    );
}

#[test]
fn underscore_ident_is_not_a_keyword() {
    use crate::TokenTag;

    let tags: Vec<_> = Lexer::from("_Boolean _static_assert")
        .map(Result::unwrap)
        .collect();

    assert_eq!(
        tags,
        vec![
            TokenTag::Identifier("_Boolean"),
            TokenTag::Identifier("_static_assert")
        ]
    );
}
