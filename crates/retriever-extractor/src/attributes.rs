//! The metadata attributes copied onto a captured record

use retriever_domain::CapturedRecord;

/// Envelope member holding a string value
pub const STRING_VALUE: &str = "StringValue";

/// Envelope member naming the value type
pub(crate) const DATA_TYPE: &str = "DataType";

/// A record field fed from one metadata attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// `URL`
    Url,
    /// `API`
    Api,
    /// `Parameters`
    Parameters,
    /// `StartTime`
    StartTime,
    /// `PID`
    ScriptPid,
    /// `ScriptName`
    ScriptName,
    /// `ResponseTime`
    ResponseTime,
    /// `ResponseCode`
    ResponseCode,
}

/// Every attribute, in extraction order
pub const ATTRIBUTES: [Attribute; 8] = [
    Attribute::Url,
    Attribute::Api,
    Attribute::Parameters,
    Attribute::StartTime,
    Attribute::ScriptPid,
    Attribute::ScriptName,
    Attribute::ResponseTime,
    Attribute::ResponseCode,
];

impl Attribute {
    /// Name of the attribute in the metadata map
    pub fn metadata_name(&self) -> &'static str {
        match self {
            Attribute::Url => "URL",
            Attribute::Api => "API",
            Attribute::Parameters => "Parameters",
            Attribute::StartTime => "StartTime",
            Attribute::ScriptPid => "PID",
            Attribute::ScriptName => "ScriptName",
            Attribute::ResponseTime => "ResponseTime",
            Attribute::ResponseCode => "ResponseCode",
        }
    }

    /// The record field this attribute fills
    pub(crate) fn field_mut<'a>(&self, record: &'a mut CapturedRecord) -> &'a mut String {
        match self {
            Attribute::Url => &mut record.url,
            Attribute::Api => &mut record.api,
            Attribute::Parameters => &mut record.parameters,
            Attribute::StartTime => &mut record.start_time,
            Attribute::ScriptPid => &mut record.script_pid,
            Attribute::ScriptName => &mut record.script_name,
            Attribute::ResponseTime => &mut record.response_time,
            Attribute::ResponseCode => &mut record.response_code,
        }
    }
}
