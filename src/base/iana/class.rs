//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for
    /// different network types. In practice, only the IN class is really
    /// relevant. In addition, there are query classes used in questions or
    /// meta records, namely NONE and ANY.
    ///
    /// Classes are represented by a 16 bit value. The type wraps these
    /// values.
    ///
    /// See [RFC 1034] for the introduction of classes and the
    /// [DNS CLASSes IANA registry] for an overview of assigned values.
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    /// [DNS CLASSes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16;

    /// Internet (IN).
    (IN => 1, "IN")

    /// Chaosnet (CH).
    (CH => 3, "CH")

    /// Hesiod (HS).
    (HS => 4, "HS")

    /// Query class None.
    ///
    /// Used in UPDATE queries to require that an RRset does not exist prior
    /// to the update.
    (NONE => 0xFE, "NONE")

    /// Query class ANY.
    ///
    /// In queries, requests records from any class. Meta records such as
    /// TSIG that aren’t part of any zone use it as their class.
    (ANY => 0xFF, "ANY")
}

int_enum_str_with_prefix!(Class, "CLASS", u16, "unknown class");

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn display() {
        assert_eq!(Class::ANY.to_string(), "ANY");
        assert_eq!(Class::IN.to_string(), "IN");
        assert_eq!(Class::from_int(0x1234).to_string(), "CLASS4660");
    }

    #[test]
    fn from_str() {
        assert_eq!(Class::from_str("any"), Ok(Class::ANY));
        assert_eq!(Class::from_str("CLASS255"), Ok(Class::ANY));
        assert_eq!(Class::from_str("class7"), Ok(Class::from_int(7)));
        assert!(Class::from_str("CLASS").is_err());
        assert!(Class::from_str("CLASS65536").is_err());
        assert!(Class::from_str("7").is_err());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Class::IN), "Class::IN");
        assert_eq!(format!("{:?}", Class::from_int(7)), "Class(7)");
    }
}
