//! Property-based round trips through the line codec.

use nomad_proto::{is_middle_safe, Command, Message, NickExt, Prefix, Verb};
use proptest::prelude::*;

/// Nicknames accepted by the nickname pattern: 2-32 chars, letter or
/// `[]{}^\`` first, then letters, digits or the same punctuation.
fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Zéß\\[\\]{}^`][a-zA-Z0-9éß\\[\\]{}^`]{1,31}")
        .expect("valid regex")
}

/// Trailing text without line breaks.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0]{0,100}").expect("valid regex")
}

/// Short params, weighted towards the shapes that need care in the
/// middle: empty, leading colon, embedded spaces.
fn param_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        prop::string::string_regex(":[^\r\n\0]{0,10}").expect("valid regex"),
        prop::string::string_regex("[a-z]{1,5} [a-z ]{0,5}").expect("valid regex"),
        prop::string::string_regex("[^\r\n\0]{0,20}").expect("valid regex"),
    ]
}

proptest! {
    #[test]
    fn nick_round_trips(nick in nickname_strategy()) {
        prop_assert!(nick.is_valid_nick());

        let line = format!("NICK {}\r\n", nick);
        let parsed: Message = line.parse().unwrap();
        prop_assert_eq!(&parsed.command, &Command::Verb(Verb::NICK, vec![nick.clone()]));

        let echoed = Message::verb(None, Verb::NICK, &[&nick]);
        prop_assert_eq!(echoed.to_line(), line);
    }

    #[test]
    fn nick_echo_with_prefix_round_trips(old in nickname_strategy(), new in nickname_strategy()) {
        let echo = Message::verb(Some(Prefix::new(old.as_str(), "u", "host.example")), Verb::NICK, &[&new]);
        let reparsed: Message = echo.to_line().parse().unwrap();
        prop_assert_eq!(reparsed.source_nickname(), Some(old.as_str()));
        prop_assert_eq!(reparsed.command.arg(0), Some(new.as_str()));
    }

    #[test]
    fn trailing_text_survives(text in text_strategy()) {
        let msg = Message::verb(None, Verb::NOTICE, &["dan", &text]);
        let reparsed: Message = msg.to_line().parse().unwrap();
        prop_assert_eq!(reparsed.command.arg(1), Some(text.as_str()));
    }

    #[test]
    fn any_params_keep_their_field_count(
        params in prop::collection::vec(param_strategy(), 1..6)
    ) {
        let borrowed: Vec<&str> = params.iter().map(String::as_str).collect();
        let msg = Message::verb(None, Verb::NOTICE, &borrowed);
        let reparsed: Message = msg.to_line().parse().unwrap();
        let got = reparsed.command.params();
        prop_assert_eq!(got.len(), params.len());

        let last = params.len() - 1;
        for (idx, (sent, back)) in params.iter().zip(got).enumerate() {
            if idx == last || is_middle_safe(sent) {
                prop_assert_eq!(back, sent);
            } else {
                prop_assert_eq!(back.as_str(), "*");
            }
        }

        let all_safe = params[..last].iter().all(|p| is_middle_safe(p));
        match msg.try_to_line() {
            Ok(line) => {
                prop_assert!(all_safe);
                let exact: Message = line.parse().unwrap();
                prop_assert_eq!(exact.command.params(), &params[..]);
            }
            Err(_) => prop_assert!(!all_safe),
        }
    }

    #[test]
    fn parse_never_panics(line in "\\PC{0,600}") {
        let _ = line.parse::<Message>();
    }
}
