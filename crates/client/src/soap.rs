//! SOAP envelope construction.
//!
//! The legacy service speaks SOAP 1.2 for submissions and SOAP 1.1 for
//! everything else; the WCF service wraps its login and query parameters
//! as CDATA-embedded inner XML documents. All three shapes are built here,
//! and every interpolated value passes through the one [`escape`] function.

use secrecy::ExposeSecret;

use crate::settings::ArasSettings;

/// Operation namespace shared by both carrier services.
pub(crate) const TEMPURI_NS: &str = "http://tempuri.org/";

/// Content type for SOAP 1.2 calls (submission).
pub(crate) const SOAP12_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Content type for SOAP 1.1 calls (everything else).
pub(crate) const SOAP11_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Escape the five XML metacharacters. Every value interpolated into an
/// envelope goes through here, including values inside the CDATA blobs
/// (those are XML again once the WCF service unwraps them).
pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Push-style XML writer for envelope bodies.
///
/// Writes compact XML (the services ignore whitespace). Leaf values are
/// escaped; tag names are trusted literals from this crate.
#[derive(Debug, Default)]
pub(crate) struct XmlWriter {
    buf: String,
}

impl XmlWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Open `<tag>`.
    pub(crate) fn open(&mut self, tag: &str) {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Open `<tag xmlns="...">`.
    pub(crate) fn open_ns(&mut self, tag: &str, xmlns: &str) {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(" xmlns=\"");
        self.buf.push_str(xmlns);
        self.buf.push_str("\">");
    }

    /// Close `</tag>`.
    pub(crate) fn close(&mut self, tag: &str) {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Write `<tag>value</tag>` with the value escaped.
    pub(crate) fn leaf(&mut self, tag: &str, value: &str) {
        self.open(tag);
        self.buf.push_str(&escape(value));
        self.close(tag);
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}

/// Wrap a body in the SOAP 1.2 envelope the submission endpoint expects.
pub(crate) fn soap12_envelope(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap12:Envelope \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
         xmlns:soap12=\"http://www.w3.org/2003/05/soap-envelope\">\
         <soap12:Body>{body}</soap12:Body>\
         </soap12:Envelope>"
    )
}

/// Wrap a body in the SOAP 1.1 envelope the legacy lookups expect.
pub(crate) fn soap11_envelope(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
         xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <soap:Body>{body}</soap:Body>\
         </soap:Envelope>"
    )
}

/// Build the WCF envelope: empty header, operation element in the `tem`
/// namespace, login and query parameters as CDATA-wrapped inner XML.
pub(crate) fn wcf_envelope(operation: &str, login_blob: &str, query_blob: &str) -> String {
    format!(
        "<soapenv:Envelope \
         xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         xmlns:tem=\"http://tempuri.org/\">\
         <soapenv:Header/>\
         <soapenv:Body>\
         <tem:{operation}>\
         <tem:loginInfo><![CDATA[{login_blob}]]></tem:loginInfo>\
         <tem:queryInfo><![CDATA[{query_blob}]]></tem:queryInfo>\
         </tem:{operation}>\
         </soapenv:Body>\
         </soapenv:Envelope>"
    )
}

/// The `<LoginInfo>` blob carrying the query credentials.
pub(crate) fn wcf_login_blob(settings: &ArasSettings) -> String {
    let mut xml = XmlWriter::new();
    xml.open("LoginInfo");
    xml.leaf("UserName", &settings.query_username);
    xml.leaf("Password", settings.query_password.expose_secret());
    xml.leaf("CustomerCode", &settings.query_customer_code);
    xml.close("LoginInfo");
    xml.finish()
}

/// The `<QueryInfo>` blob: a query type plus one keyed parameter
/// (`IntegrationCode` or `TrackingNumber`).
pub(crate) fn wcf_query_blob(query_type: &str, key: &str, value: &str) -> String {
    let mut xml = XmlWriter::new();
    xml.open("QueryInfo");
    xml.leaf("QueryType", query_type);
    xml.leaf(key, value);
    xml.close("QueryInfo");
    xml.finish()
}
