use proptest::prelude::*;
use riko_runtime::envelope::{Envelope, open, seal};
use riko_runtime::{Handle, MalformedPayload, Marshal, from_bytes, to_bytes};

fn round_trip<T: Marshal>(value: &T) -> T {
    from_bytes(&to_bytes(value).unwrap()).unwrap()
}

proptest! {
    #[test]
    fn unsigned_integers_survive(
        a in any::<u8>(),
        b in any::<u16>(),
        c in any::<u32>(),
        d in any::<u64>()
    ) {
        prop_assert_eq!(round_trip(&a), a);
        prop_assert_eq!(round_trip(&b), b);
        prop_assert_eq!(round_trip(&c), c);
        prop_assert_eq!(round_trip(&d), d);
    }

    #[test]
    fn signed_integers_survive(
        a in any::<i8>(),
        b in any::<i16>(),
        c in any::<i32>(),
        d in any::<i64>()
    ) {
        prop_assert_eq!(round_trip(&a), a);
        prop_assert_eq!(round_trip(&b), b);
        prop_assert_eq!(round_trip(&c), c);
        prop_assert_eq!(round_trip(&d), d);
    }

    #[test]
    fn booleans_survive(b in any::<bool>()) {
        prop_assert_eq!(to_bytes(&b).unwrap(), vec![u8::from(b)]);
        prop_assert_eq!(round_trip(&b), b);
    }

    #[test]
    fn floats_keep_their_bits(x in any::<f64>(), y in any::<f32>()) {
        prop_assert_eq!(round_trip(&x).to_bits(), x.to_bits());
        prop_assert_eq!(round_trip(&y).to_bits(), y.to_bits());
    }

    #[test]
    fn strings_and_bytes_survive(
        s in any::<String>(),
        v in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        prop_assert_eq!(round_trip(&s), s);
        prop_assert_eq!(round_trip(&v), v);
    }

    #[test]
    fn optionals_survive(
        s in prop::option::of(any::<String>()),
        n in prop::option::of(any::<u64>()),
        b in prop::option::of(any::<bool>())
    ) {
        prop_assert_eq!(round_trip(&s), s);
        prop_assert_eq!(round_trip(&n), n);
        prop_assert_eq!(round_trip(&b), b);
    }

    #[test]
    fn nested_optionals_survive(
        v in prop::option::of(prop::option::of(prop::collection::vec(any::<u8>(), 0..64)))
    ) {
        prop_assert_eq!(round_trip(&v), v);
    }

    #[test]
    fn nonzero_handles_survive(raw in 1..=u64::MAX) {
        let handle = Handle::new(raw);
        prop_assert_eq!(round_trip(&handle), handle);
    }

    #[test]
    fn any_cut_of_a_string_is_rejected(
        s in any::<String>(),
        cut in any::<prop::sample::Index>()
    ) {
        let buf = to_bytes(&s).unwrap();
        let cut = cut.index(buf.len());
        prop_assert!(from_bytes::<String>(&buf[..cut]).is_err());
    }

    #[test]
    fn extra_bytes_are_rejected(
        v in any::<u32>(),
        tail in prop::collection::vec(any::<u8>(), 1..16)
    ) {
        let mut buf = to_bytes(&v).unwrap();
        buf.extend_from_slice(&tail);
        prop_assert_eq!(
            from_bytes::<u32>(&buf).unwrap_err(),
            MalformedPayload::TrailingBytes(tail.len())
        );
    }

    #[test]
    fn zero_never_decodes_as_a_handle(tail in prop::collection::vec(any::<u8>(), 0..8)) {
        let mut buf = to_bytes(&0_u64).unwrap();
        buf.extend_from_slice(&tail);
        prop_assert_eq!(from_bytes::<Handle>(&buf).unwrap_err(), MalformedPayload::NullHandle);
    }

    #[test]
    fn arbitrary_input_never_panics(buf in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = from_bytes::<Option<String>>(&buf);
        let _ = from_bytes::<Vec<u8>>(&buf);
        let _ = open::<Handle>(&buf);
    }

    #[test]
    fn error_envelopes_survive(kind in "[A-Za-z]{1,24}", message in any::<String>()) {
        let buf = seal(&Envelope::<u64>::err(kind.clone(), message.clone()));
        let payload = open::<u64>(&buf).unwrap().unwrap_err();
        prop_assert_eq!(payload.kind, kind);
        prop_assert_eq!(payload.message, message);
    }
}
