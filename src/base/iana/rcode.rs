//! TSIG response codes.

//------------ TsigRcode ----------------------------------------------------

int_enum! {
    /// Response codes for transaction authentication (TSIG).
    ///
    /// TSIG and TKEY resource records contain a 16 bit wide error field
    /// whose values are an extension of the standard DNS response codes.
    /// The name space is shared with the codes of the message header and
    /// the EDNS extended code except for a collision between the BADVERS
    /// and BADSIG values. This type represents the code as used by TSIG.
    ///
    /// The values are defined in the [IANA DNS RCODEs] registry.
    ///
    /// [IANA DNS RCODEs]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
    =>
    TsigRcode, u16;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// Format error.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    (REFUSED => 5, "REFUSED")

    /// Name exists when it should not.
    (YXDOMAIN => 6, "YXDOMAIN")

    /// RR set exists when it should not.
    (YXRRSET => 7, "YXRRSET")

    /// RR set that should exist does not.
    (NXRRSET => 8, "NXRRSET")

    /// Server not authoritative for zone or client not authorized.
    (NOTAUTH => 9, "NOTAUTH")

    /// Name not contained in zone.
    (NOTZONE => 10, "NOTZONE")

    /// TSIG signature failure.
    (BADSIG => 16, "BADSIG")

    /// Key not recognized.
    (BADKEY => 17, "BADKEY")

    /// Signature out of time window.
    (BADTIME => 18, "BADTIME")

    /// Bad TKEY mode.
    (BADMODE => 19, "BADMODE")

    /// Duplicate key name.
    (BADNAME => 20, "BADNAME")

    /// Algorithm not supported.
    (BADALG => 21, "BADALG")

    /// Bad truncation.
    (BADTRUNC => 22, "BADTRUNC")

    /// Bad or missing server cookie.
    (BADCOOKIE => 23, "BADCOOKIE")
}

int_enum_str_with_decimal!(TsigRcode, u16, "unknown TSIG error");

//============ Testing =======================================================
