//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind of
    /// information is represented by the record. Normal query includes the
    /// type of record information is requested for. A few additional types,
    /// called query types, are defined as well and can only be used in
    /// questions. Meta types such as OPT and TSIG only ever appear in the
    /// additional section of a message.
    ///
    /// For more information see the [IANA DNS RR TYPE registry].
    ///
    /// [IANA DNS RR TYPE registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// OPT pseudo-record for EDNS.
    (OPT => 41, "OPT")

    /// Transaction key.
    (TKEY => 249, "TKEY")

    /// Transaction signature.
    ///
    /// See [RFC 8945].
    ///
    /// [RFC 8945]: https://tools.ietf.org/html/rfc8945
    (TSIG => 250, "TSIG")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16, "unknown record type");

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn tsig() {
        assert_eq!(Rtype::TSIG.to_int(), 250);
        assert_eq!(Rtype::from_int(250).to_string(), "TSIG");
        assert_eq!(Rtype::from_str("tsig"), Ok(Rtype::TSIG));
        assert_eq!(Rtype::from_str("TYPE250"), Ok(Rtype::TSIG));
    }

    #[test]
    fn compose() {
        let mut buf = std::vec::Vec::new();
        Rtype::TSIG.compose(&mut buf).unwrap();
        assert_eq!(buf, b"\x00\xfa");
        assert_eq!(Rtype::COMPOSE_LEN, 2);
        assert_eq!(Rtype::from_int(1234).to_string(), "TYPE1234");
    }
}
