// End-to-end write -> read checks, including the four reference scenarios
// and property-based round trips over generated value trees.

#[cfg(test)]
mod tests {
    use dynary_core::prelude::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn roundtrip(tokens: &[Token], options: CodecOptions) -> Vec<Token> {
        let bytes = encode_to_vec(tokens, options.clone()).unwrap();
        decode_from_slice(&bytes, options).unwrap()
    }

// ## 1️⃣ Reference scenarios

    #[test]
    fn scenario_single_integer() {
        let mut w = DynaryWriter::new(Vec::new());
        w.write_integer(42).unwrap();
        w.end_stream().unwrap();
        let bytes = w.into_inner();

        let tokens = DynaryReader::new(&bytes[..]).read_to_end().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), Tag::Integer);
        assert_eq!(tokens[0].value(), &Value::Integer(42));
    }

    #[test]
    fn scenario_compound_with_parent_links() {
        let mut c = Compound::new();
        c.push(7i16).push("hi");
        let mut w = DynaryWriter::new(Vec::new());
        w.write_compound(&c).unwrap();
        let bytes = w.into_inner();
        assert_eq!(*bytes.last().unwrap(), Tag::Eoc.to_u8());

        let decoded = DynaryReader::new(&bytes[..]).read_compound().unwrap().unwrap();
        assert_eq!(decoded, c);
        assert_eq!(decoded.get(0).unwrap().value(), &Value::Short(7));
        assert_eq!(decoded.get(1).unwrap().value().as_str(), Some("hi"));
        for (i, token) in decoded.iter().enumerate() {
            let parent = token.parent().unwrap();
            assert_eq!(parent.compound, decoded.id());
            assert_eq!(parent.index, i);
        }
    }

    #[test]
    fn scenario_list_of_strings() {
        let items: Vec<String> = ["a", "bb", "ccc"].iter().map(|s| s.to_string()).collect();
        let mut w = DynaryWriter::new(Vec::new());
        w.write_list_of(&items).unwrap();
        let bytes = w.into_inner();

        let decoded = DynaryReader::new(&bytes[..]).read_list_of::<String>().unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn scenario_list_of_pairs_keeps_key_value_order() {
        let pairs = [Pair::new("key01", "value01"), Pair::new("key02", "value02")];
        let tokens = vec![Token::new(List::from_items(pairs.clone()))];

        let decoded = roundtrip(&tokens, CodecOptions::default());
        assert_eq!(decoded, tokens);

        let list = decoded[0].value().as_list().unwrap();
        assert_eq!(list.element(), Tag::Pair);
        let got: Vec<(String, String)> = list
            .iter()
            .map(|v| {
                let p = v.as_pair().unwrap();
                (p.key().as_str().unwrap().to_owned(), p.value().as_str().unwrap().to_owned())
            })
            .collect();
        assert_eq!(
            got,
            vec![
                ("key01".to_string(), "value01".to_string()),
                ("key02".to_string(), "value02".to_string()),
            ]
        );
    }

// ## 2️⃣ Regressions

    #[test]
    fn pair_token_is_not_swapped() {
        let tokens = vec![Token::new(Pair::new(1u8, "one"))];
        let decoded = roundtrip(&tokens, CodecOptions::default());

        let pair = decoded[0].value().as_pair().unwrap();
        assert_eq!(pair.key(), &Value::Byte(1));
        assert_eq!(pair.value().as_str(), Some("one"));
    }

    #[test]
    fn list_of_compounds_roundtrips() {
        let a = Compound::from_values([1i32, 2]);
        let b = Compound::from_values(["x"]);
        let tokens = vec![Token::new(List::from_items([a, b]))];
        assert_eq!(roundtrip(&tokens, CodecOptions::strict()), tokens);
    }

    #[test]
    fn nested_compounds_roundtrip_to_depth() {
        let mut value = Compound::from_values([0u8]);
        for d in 1..10u8 {
            let mut outer = Compound::from_values([d]);
            outer.push(value);
            value = outer;
        }
        assert_eq!(value.depth(), 10);

        let tokens = vec![Token::new(value)];
        assert_eq!(roundtrip(&tokens, CodecOptions::default()), tokens);
    }

    #[test]
    fn sequence_ids_follow_stream_order() {
        let tokens: Vec<Token> = (0..5i32).map(Token::new).collect();
        let decoded = roundtrip(&tokens, CodecOptions::default());
        for (i, t) in decoded.iter().enumerate() {
            assert_eq!(t.sequence_id(), i as u64);
            assert!(t.parent().is_none());
        }
    }

// ## 3️⃣ Properties

    fn bmp_char() -> impl Strategy<Value = char> {
        any::<char>().prop_filter("single UTF-16 unit", |c| (*c as u32) <= 0xFFFF)
    }

    fn text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9][a-zA-Z0-9 ]{0,40}"
    }

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<u8>().prop_map(Value::Byte),
            bmp_char().prop_map(Value::Char),
            any::<i16>().prop_map(Value::Short),
            any::<i32>().prop_map(Value::Integer),
            any::<i64>().prop_map(Value::Long),
            (-1.0e6f32..1.0e6f32).prop_map(Value::Float),
            (-1.0e12f64..1.0e12f64).prop_map(Value::Double),
            any::<bool>().prop_map(Value::Bool),
            any::<i8>().prop_map(Value::SByte),
            text().prop_map(Value::String),
            any::<u16>().prop_map(Value::UShort),
            any::<u64>().prop_map(Value::ULong),
            any::<u32>().prop_map(Value::UInt),
        ]
    }

    fn list() -> impl Strategy<Value = Value> {
        prop_oneof![
            vec(any::<u8>(), 1..=255).prop_map(|v| Value::from(List::from_items(v))),
            vec(any::<i64>(), 1..16).prop_map(|v| Value::from(List::from_items(v))),
            vec(bmp_char(), 1..16).prop_map(|v| Value::from(List::from_items(v))),
            vec(text(), 1..8).prop_map(|v| Value::from(List::from_items(v))),
        ]
    }

    fn value() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(k, v)| Value::from(Pair::new(k, v))),
                vec(inner, 0..6).prop_map(|vs| Value::Compound(Compound::from_values(vs))),
                list(),
            ]
        })
    }

    proptest! {
        #[test]
        fn generated_streams_roundtrip(values in vec(value(), 0..12)) {
            let tokens: Vec<Token> = values.into_iter().map(Token::new).collect();
            let bytes = encode_to_vec(&tokens, CodecOptions::strict()).unwrap();
            let decoded = decode_from_slice(&bytes, CodecOptions::strict()).unwrap();
            prop_assert_eq!(decoded, tokens);
        }

        #[test]
        fn strings_roundtrip_in_every_encoding(s in "[ -~]{1,255}") {
            prop_assume!(!s.trim().is_empty());
            for enc in [
                CharEncoding::Utf16Le,
                CharEncoding::Utf16Be,
                CharEncoding::Utf32Le,
                CharEncoding::Latin1,
            ] {
                let opts = CodecOptions::default().with_encoding(enc);
                let tokens = vec![Token::new(s.as_str())];
                let bytes = encode_to_vec(&tokens, opts.clone()).unwrap();
                prop_assert_eq!(bytes.len(), 2 + s.len() * enc.unit_width() + 1);
                prop_assert_eq!(decode_from_slice(&bytes, opts).unwrap(), tokens);
            }
        }

        #[test]
        fn truncating_a_stream_never_succeeds(values in vec(value(), 1..6), cut in 1usize..64) {
            let tokens: Vec<Token> = values.into_iter().map(Token::new).collect();
            let bytes = encode_to_vec(&tokens, CodecOptions::strict()).unwrap();
            let keep = bytes.len().saturating_sub(cut.min(bytes.len()));
            prop_assert!(decode_from_slice(&bytes[..keep], CodecOptions::strict()).is_err());
        }
    }
}
