// Writer byte layouts and length/null policies.
//
// Every expectation here is a literal byte string: the format has no header or
// version, so layouts must never drift.

#[cfg(test)]
mod tests {
    use dynary_core::prelude::*;
    use dynary_core::types::{LengthKind, PairSide};

    fn writer() -> DynaryWriter<Vec<u8>> {
        DynaryWriter::new(Vec::new())
    }

    fn strict_writer() -> DynaryWriter<Vec<u8>> {
        DynaryWriter::with_options(Vec::new(), CodecOptions::strict()).unwrap()
    }

    fn utf16(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

// ## 1️⃣ Fixed-width layouts

    #[test]
    fn fixed_width_values_are_little_endian() {
        let mut w = writer();
        w.write_byte(0xAB).unwrap();
        w.write_sbyte(-1).unwrap();
        w.write_short(0x0102).unwrap();
        w.write_ushort(0xFFFE).unwrap();
        w.write_integer(42).unwrap();
        w.write_uint(0x0A0B0C0D).unwrap();
        w.write_long(-2).unwrap();
        w.write_ulong(1).unwrap();
        w.write_float(1.5).unwrap();
        w.write_double(-0.0).unwrap();
        w.write_bool(true).unwrap();
        w.write_bool(false).unwrap();

        let expected: Vec<u8> = [
            &[0x00, 0xAB][..],
            &[0x09, 0xFF],
            &[0x02, 0x02, 0x01],
            &[0x0B, 0xFE, 0xFF],
            &[0x03, 42, 0, 0, 0],
            &[0x0D, 0x0D, 0x0C, 0x0B, 0x0A],
            &[0x04, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
            &[0x0C, 1, 0, 0, 0, 0, 0, 0, 0],
            &[0x05, 0x00, 0x00, 0xC0, 0x3F],
            &[0x06, 0, 0, 0, 0, 0, 0, 0, 0x80],
            &[0x08, 1],
            &[0x08, 0],
        ]
        .concat();
        assert_eq!(w.into_inner(), expected);
    }

    #[test]
    fn char_follows_active_encoding() {
        let cases = [
            (CharEncoding::Utf16Le, 'A', vec![0x01, 0x41, 0x00]),
            (CharEncoding::Utf16Be, 'A', vec![0x01, 0x00, 0x41]),
            (CharEncoding::Utf32Le, '😀', vec![0x01, 0x00, 0xF6, 0x01, 0x00]),
            (CharEncoding::Latin1, 'é', vec![0x01, 0xE9]),
        ];
        for (enc, ch, bytes) in cases {
            let opts = CodecOptions::default().with_encoding(enc);
            let mut w = DynaryWriter::with_options(Vec::new(), opts).unwrap();
            w.write_char(ch).unwrap();
            assert_eq!(w.into_inner(), bytes, "{enc}");
        }
    }

    #[test]
    fn unencodable_char_writes_nothing() {
        let mut w = writer();
        match w.write_char('😀') {
            Err(DynaryError::UnencodableChar { ch, encoding }) => {
                assert_eq!(ch, '😀');
                assert_eq!(encoding, CharEncoding::Utf16Le);
            }
            other => panic!("expected UnencodableChar, got {other:?}"),
        }

        let opts = CodecOptions::default().with_encoding(CharEncoding::Latin1);
        let mut latin = DynaryWriter::with_options(Vec::new(), opts).unwrap();
        assert!(latin.write_char('€').is_err());

        assert!(w.into_inner().is_empty());
        assert!(latin.into_inner().is_empty());
    }

// ## 2️⃣ Strings

    #[test]
    fn unencodable_string_writes_nothing() {
        let opts = CodecOptions::default().with_encoding(CharEncoding::Latin1);
        let mut w = DynaryWriter::with_options(Vec::new(), opts).unwrap();
        match w.write_string("a\u{100}") {
            Err(DynaryError::UnencodableChar { ch: '\u{100}', encoding: CharEncoding::Latin1 }) => {}
            other => panic!("expected UnencodableChar, got {other:?}"),
        }
        assert_eq!(w.counters().strings, 0);
        assert!(w.into_inner().is_empty());
    }

    #[test]
    fn string_layout_is_count_then_units() {
        let mut w = writer();
        w.write_string("hi").unwrap();
        assert_eq!(w.into_inner(), [&[0x0A, 2][..], &utf16("hi")].concat());
    }

    #[test]
    fn string_length_counts_characters_not_bytes() {
        let mut w = writer();
        w.write_string("żółw").unwrap();
        let out = w.into_inner();
        assert_eq!(out[1], 4);
        assert_eq!(out.len(), 2 + 4 * 2);
    }

    #[test]
    fn max_length_string_is_written() {
        let text = "x".repeat(255);
        let mut w = strict_writer();
        w.write_string(&text).unwrap();
        let out = w.into_inner();
        assert_eq!(out[..2], [0x0A, 255]);
        assert_eq!(out.len(), 2 + 255 * 2);
    }

    #[test]
    fn blank_and_oversized_strings_are_skipped_by_default() {
        let mut w = writer();
        w.write_string("").unwrap();
        w.write_string("   ").unwrap();
        w.write_string(&"y".repeat(256)).unwrap();

        assert_eq!(w.counters().skipped_strings, 3);
        assert_eq!(w.counters().strings, 0);
        assert!(w.into_inner().is_empty());
    }

    #[test]
    fn strict_policy_rejects_blank_and_oversized_strings() {
        let mut w = strict_writer();
        match w.write_string(" ") {
            Err(DynaryError::InvalidLength { what: LengthKind::String, len: 0, min: 1, max: 255 }) => {}
            other => panic!("expected InvalidLength, got {other:?}"),
        }
        match w.write_string(&"y".repeat(300)) {
            Err(DynaryError::InvalidLength { what: LengthKind::String, len: 300, .. }) => {}
            other => panic!("expected InvalidLength, got {other:?}"),
        }
        assert!(w.into_inner().is_empty());
    }

// ## 3️⃣ Lists

    #[test]
    fn list_layout_is_count_element_tag_then_payloads() {
        let mut w = writer();
        w.write_list_of(&[7i32, -1]).unwrap();
        assert_eq!(
            w.into_inner(),
            vec![0x14, 2, 0x03, 7, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn list_of_strings_has_no_per_element_tag() {
        let mut w = writer();
        w.write_list_of(&["a".to_string(), String::new()]).unwrap();
        assert_eq!(w.into_inner(), vec![0x14, 2, 0x0A, 1, b'a', 0, 0]);
    }

    #[test]
    fn empty_and_oversized_lists_follow_policy() {
        let empty = List::new(Tag::Byte, vec![]).unwrap();
        let big = List::from_items(vec![0u8; 256]);

        let mut w = writer();
        w.write_list(&empty).unwrap();
        w.write_list(&big).unwrap();
        assert_eq!(w.counters().skipped_lists, 2);
        assert!(w.into_inner().is_empty());

        let mut s = strict_writer();
        assert!(matches!(
            s.write_list(&empty),
            Err(DynaryError::InvalidLength { what: LengthKind::List, len: 0, .. })
        ));
        assert!(matches!(
            s.write_list(&big),
            Err(DynaryError::InvalidLength { what: LengthKind::List, len: 256, .. })
        ));
    }

    #[test]
    fn full_list_is_written() {
        let mut w = strict_writer();
        w.write_list(&List::from_items(vec![1u8; 255])).unwrap();
        let out = w.into_inner();
        assert_eq!(out[..3], [0x14, 255, 0x00]);
        assert_eq!(out.len(), 3 + 255);
    }

    #[test]
    fn nested_empty_list_is_always_an_error() {
        let inner = List::new(Tag::Byte, vec![]).unwrap();
        let outer = List::new(Tag::List, vec![Value::List(inner)]).unwrap();
        let mut w = writer();
        assert!(matches!(
            w.write_list(&outer),
            Err(DynaryError::InvalidLength { what: LengthKind::List, len: 0, .. })
        ));
    }

// ## 4️⃣ Pairs

    #[test]
    fn pair_is_written_key_first() {
        let mut w = writer();
        w.write_pair(&Pair::new("key01", "value01")).unwrap();

        let expected = [
            &[0x12, 0x0A, 5][..],
            &utf16("key01"),
            &[0x0A, 7],
            &utf16("value01"),
        ]
        .concat();
        assert_eq!(w.into_inner(), expected);
    }

    #[test]
    fn pair_token_matches_direct_pair_write() {
        let pair = Pair::new(1u8, 2i16);

        let mut direct = writer();
        direct.write_pair(&pair).unwrap();

        let mut via_token = writer();
        via_token.write_token(&Token::new(pair)).unwrap();

        let bytes = via_token.into_inner();
        assert_eq!(bytes, vec![0x12, 0x00, 1, 0x02, 2, 0]);
        assert_eq!(direct.into_inner(), bytes);
    }

    #[test]
    fn typed_pair_layout() {
        let mut w = writer();
        w.write_typed_pair(9u8, true).unwrap();
        assert_eq!(w.into_inner(), vec![0x12, 0x00, 9, 0x08, 1]);
    }

    #[test]
    fn missing_pair_side_is_never_skipped() {
        let one = Value::from(1i32);
        let mut w = writer();

        assert!(matches!(
            w.write_pair_parts(None, Some(&one)),
            Err(DynaryError::NullValue { side: PairSide::Key })
        ));
        assert!(matches!(
            w.write_pair_parts(Some(&one), None),
            Err(DynaryError::NullValue { side: PairSide::Value })
        ));
        assert!(w.into_inner().is_empty());
    }

    #[test]
    fn pair_allows_empty_string_but_not_oversized() {
        let mut w = writer();
        w.write_pair(&Pair::new("", 1i32)).unwrap();
        assert_eq!(w.into_inner(), vec![0x12, 0x0A, 0, 0x03, 1, 0, 0, 0]);

        let mut w = writer();
        assert!(matches!(
            w.write_pair(&Pair::new("k", "z".repeat(256))),
            Err(DynaryError::InvalidLength { what: LengthKind::String, len: 256, .. })
        ));
    }

// ## 5️⃣ Compounds and streams

    #[test]
    fn compound_is_tag_tokens_eoc() {
        let mut c = Compound::new();
        c.push(7i16).push("hi");

        let mut w = writer();
        w.write_compound(&c).unwrap();
        let expected = [&[0x13, 0x02, 7, 0, 0x0A, 2][..], &utf16("hi"), &[0x15]].concat();
        assert_eq!(w.into_inner(), expected);
    }

    #[test]
    fn skipped_token_vanishes_from_compound() {
        let mut c = Compound::new();
        c.push(1u8).push("  ").push(2u8);

        let mut w = writer();
        w.write_compound(&c).unwrap();
        assert_eq!(w.into_inner(), vec![0x13, 0x00, 1, 0x00, 2, 0x15]);
    }

    #[test]
    fn stream_ends_with_eof() {
        let tokens = vec![Token::new(42i32)];
        let mut w = writer();
        w.write_stream(&tokens).unwrap();
        assert_eq!(w.into_inner(), vec![0x03, 42, 0, 0, 0, 0x16]);
    }

    #[test]
    fn control_markers_are_single_bytes() {
        let mut w = writer();
        w.end_compound().unwrap();
        w.end_stream().unwrap();
        assert_eq!(w.into_inner(), vec![0x15, 0x16]);
    }

    #[test]
    fn depth_limit_applies_to_writes() {
        let mut mid = Compound::new();
        mid.push(Compound::new());
        let mut outer = Compound::new();
        outer.push(mid);

        let opts = CodecOptions::default().with_max_depth(2);
        let mut w = DynaryWriter::with_options(Vec::new(), opts).unwrap();
        match w.write_compound(&outer) {
            Err(DynaryError::NestingTooDeep { depth: 3, max: 2 }) => {}
            other => panic!("expected NestingTooDeep, got {other:?}"),
        }

        let mut ok = DynaryWriter::with_options(Vec::new(), CodecOptions::default().with_max_depth(3)).unwrap();
        ok.write_compound(&outer).unwrap();
    }

    #[test]
    fn invalid_options_are_rejected() {
        let opts = CodecOptions::default().with_max_depth(0);
        assert!(matches!(
            DynaryWriter::with_options(Vec::new(), opts),
            Err(DynaryError::Config(_))
        ));
    }
}
