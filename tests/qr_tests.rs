pub mod common {
    use qrview::Bitmap;

    /// Decodes the single symbol in a bitmap, returning its version and raw payload bytes.
    pub fn decode(bmp: &Bitmap) -> (usize, Vec<u8>) {
        let img = bmp.as_image();
        let (w, h) = (img.width() as usize, img.height() as usize);
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w, h, |x, y| {
            img.get_pixel(x as u32, y as u32).0[0]
        });
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "Expected exactly one symbol");

        let mut content = Vec::new();
        let meta = grids[0].decode_to(&mut content).expect("Failed to read QR");
        (meta.version.0, content)
    }
}

#[cfg(test)]
mod qr_proptests {
    use prop::string::string_regex;
    use proptest::prelude::*;

    use qrview::*;

    use super::common::decode;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn text_strategy(regex: &str, max_sz: usize) -> impl Strategy<Value = String> {
        let pattern = format!(r"{}{{0,{}}}", regex, max_sz);
        string_regex(&pattern).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn proptest_round_trip_latin1(
            ecl in ec_level_strategy(),
            data in text_strategy(r"[ -~\u{a0}-\u{ff}]", 200),
        ) {
            let qr = encode(&data, ecl).unwrap();
            let (ver, decoded) = decode(&qr.render(3, 4));

            prop_assert_eq!(ver, *qr.version());
            prop_assert_eq!(decoded, to_latin1(&data).unwrap().into_owned());
        }

        #[test]
        fn proptest_round_trip_numeric(
            ecl in ec_level_strategy(),
            data in text_strategy("[0-9]", 600),
        ) {
            let qr = encode(&data, ecl).unwrap();
            let (_, decoded) = decode(&qr.render(3, 4));

            prop_assert_eq!(decoded, data.into_bytes());
        }

        #[test]
        fn proptest_round_trip_alphanumeric(
            ecl in ec_level_strategy(),
            data in text_strategy(r"[0-9A-Z $%*+\-./:]", 400),
        ) {
            let qr = encode(&data, ecl).unwrap();
            let (_, decoded) = decode(&qr.render(3, 4));

            prop_assert_eq!(decoded, data.into_bytes());
        }

        #[test]
        fn proptest_idempotent(ecl in ec_level_strategy(), data in text_strategy("[ -~]", 100)) {
            prop_assert_eq!(encode(&data, ecl), encode(&data, ecl));
        }

        #[test]
        fn proptest_bitmap_geometry(
            data in text_strategy("[ -~]", 60),
            module_sz in 1u32..6,
            quiet_zone in 0u32..6,
        ) {
            let qr = encode(&data, ECLevel::M).unwrap();
            let unit = qr.render(1, quiet_zone);
            let scaled = qr.render(module_sz, quiet_zone);

            let side = qr.width() as u32 + 2 * quiet_zone;
            prop_assert_eq!((unit.width(), unit.height()), (side, side));
            prop_assert_eq!((scaled.width(), scaled.height()), (side * module_sz, side * module_sz));
            for y in 0..scaled.height() {
                for x in 0..scaled.width() {
                    prop_assert_eq!(
                        scaled.is_dark(x, y),
                        unit.is_dark(x / module_sz, y / module_sz)
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use qrview::{encode, to_latin1, ECLevel, MaskPattern, QRBuilder, QRError, Version};

    use super::common::decode;

    #[test_case("HELLO", ECLevel::H; "test_qr_1")]
    #[test_case("Hello, world!", ECLevel::L; "test_qr_2")]
    #[test_case("TEST", ECLevel::M; "test_qr_3")]
    #[test_case("12345", ECLevel::Q; "test_qr_4")]
    #[test_case("Here's to the crazy ones. The misfits. The rebels.", ECLevel::H; "test_qr_5")]
    #[test_case("café crème, 3 × 4 = 12 ½", ECLevel::M; "test_qr_6")]
    #[test_case("https://example.com/?q=QR%20CODE&n=0123456789", ECLevel::Q; "test_qr_7")]
    fn test_qr(data: &str, ecl: ECLevel) {
        let qr = encode(data, ecl).unwrap();
        let (ver, decoded) = decode(&qr.render(4, 4));

        assert_eq!(ver, *qr.version());
        assert_eq!(decoded, to_latin1(data).unwrap().into_owned());
    }

    #[test_case("B3@jé#Z%8vñK!ü3zC^8ö&rßF9*ÿb6à".repeat(3), 7, ECLevel::L; "test_qr_v7_l")]
    #[test_case("A11111111111111".repeat(11), 7, ECLevel::M; "test_qr_v7_m")]
    #[test_case("aAAAAAA1111111111111AAAAAAa".repeat(3), 7, ECLevel::Q; "test_qr_v7_q")]
    #[test_case("1234567890".repeat(15), 7, ECLevel::H; "test_qr_v7_h")]
    #[test_case("B3@jé#Z%8vñK!ü3zC^8ö&rßF9*ÿb6à".repeat(4), 10, ECLevel::L; "test_qr_v10_l")]
    #[test_case("A11111111111111".repeat(20), 10, ECLevel::M; "test_qr_v10_m")]
    #[test_case("aAAAAAAAAA1111111111111111AAAAAAAAAAa".repeat(4), 10, ECLevel::Q; "test_qr_v10_q")]
    #[test_case("1234567890".repeat(28), 10, ECLevel::H; "test_qr_v10_h")]
    #[test_case("B3@jé#Z%8vñK!ü3zC^8ö&rßF9*ÿb6à".repeat(22), 27, ECLevel::L; "test_qr_v27_l")]
    #[test_case("A111111111111111".repeat(100), 27, ECLevel::M; "test_qr_v27_m")]
    #[test_case("aAAAAAAAAA111111111111111111AAAAAAAAAAa".repeat(20), 27, ECLevel::Q; "test_qr_v27_q")]
    #[test_case("1234567890".repeat(145), 27, ECLevel::H; "test_qr_v27_h")]
    #[test_case("B3@jé#Z%8vñK!ü3zC^8ö&rßF9*ÿb6à".repeat(57), 40, ECLevel::L; "test_qr_v40_l")]
    #[test_case("A111111111111111".repeat(97), 40, ECLevel::M; "test_qr_v40_m")]
    #[test_case("aAAAAAAAAA111111111111111111AAAAAAAAAAa".repeat(42), 40, ECLevel::Q; "test_qr_v40_q")]
    #[test_case("1234567890".repeat(305), 40, ECLevel::H; "test_qr_v40_h")]
    fn test_qr_with_version(data: String, ver: usize, ecl: ECLevel) {
        let bytes = to_latin1(&data).unwrap();
        let qr = QRBuilder::new(&bytes).version(Version::new(ver).unwrap()).ec_level(ecl).build();
        let qr = qr.unwrap();
        let (decoded_ver, decoded) = decode(&qr.render(3, 4));

        assert_eq!(decoded_ver, ver);
        assert_eq!(decoded, bytes.into_owned());
    }

    #[test_case(ECLevel::L)]
    #[test_case(ECLevel::M)]
    #[test_case(ECLevel::Q)]
    #[test_case(ECLevel::H)]
    fn test_empty_payload(ecl: ECLevel) {
        let qr = encode("", ecl).unwrap();
        assert_eq!(*qr.version(), 1);
        let (ver, decoded) = decode(&qr.render(4, 4));
        assert_eq!(ver, 1);
        assert!(decoded.is_empty());
    }

    #[test_case(ECLevel::L, 2953)]
    #[test_case(ECLevel::M, 2331)]
    #[test_case(ECLevel::Q, 1663)]
    #[test_case(ECLevel::H, 1273)]
    fn test_capacity_boundary(ecl: ECLevel, max_len: usize) {
        let qr = encode(&"a".repeat(max_len), ecl).unwrap();
        assert_eq!(*qr.version(), 40);
        assert_eq!(encode(&"a".repeat(max_len + 1), ecl), Err(QRError::DataTooLong));
    }

    #[test]
    fn test_hello_is_reproducible() {
        let first = encode("HELLO", ECLevel::H).unwrap();
        for _ in 0..3 {
            assert_eq!(encode("HELLO", ECLevel::H).unwrap(), first);
        }
        assert_eq!(*first.version(), 1);
        assert_eq!(first.width(), 21);
        assert_eq!(first.mask(), Some(MaskPattern::new(5).unwrap()));
        assert_eq!(first.count_dark_modules(), 226);
        assert!(first.is_dark(8, 13));
        assert_eq!(first.render(1, 4), encode("HELLO", ECLevel::H).unwrap().render(1, 4));
    }

    #[test]
    fn test_non_latin1_fails() {
        assert_eq!(encode("Hello, world!🌎", ECLevel::L), Err(QRError::InvalidChar('🌎')));
        assert_eq!(encode("price: 5€", ECLevel::H), Err(QRError::InvalidChar('€')));
    }

    #[test]
    fn test_level_change_shrinks_symbol() {
        let text = "Here's to the crazy ones. The misfits. The rebels.";
        let high = encode(text, ECLevel::H).unwrap();
        let low = encode(text, ECLevel::L).unwrap();
        assert!(low.width() < high.width());
        assert_eq!(decode(&low.render(4, 4)).1, text.as_bytes());
    }
}
