//! Single-select enumerations: transfer direction and document stage.

use std::fmt;
use std::str::FromStr;

use crate::error::ParamError;

/// Direction of a transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransferType {
    /// Money flowing into the account.
    Deposit,
    /// Money flowing out of the account.
    Withdrawal,
}

impl TransferType {
    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TransferType {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            other => Err(ParamError::UnknownVariant {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// Progress of the signed document backing a transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DocumentStage {
    /// No document has been received yet.
    #[default]
    Requested,
    /// A document was uploaded and awaits verification.
    Uploaded,
    /// The document was checked and accepted.
    Verified,
    /// The document was refused and must be replaced.
    Rejected,
}

impl DocumentStage {
    /// Returns the wire name of the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Uploaded => "uploaded",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DocumentStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for DocumentStage {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "requested" => Ok(Self::Requested),
            "uploaded" => Ok(Self::Uploaded),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParamError::UnknownVariant {
                field: "stage",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TransferType::Deposit)]
    #[case(TransferType::Withdrawal)]
    fn transfer_type_names_parse_back(#[case] transfer_type: TransferType) {
        assert_eq!(transfer_type.as_str().parse(), Ok(transfer_type));
    }

    #[rstest]
    #[case(DocumentStage::Requested)]
    #[case(DocumentStage::Uploaded)]
    #[case(DocumentStage::Verified)]
    #[case(DocumentStage::Rejected)]
    fn stage_names_parse_back(#[case] stage: DocumentStage) {
        assert_eq!(stage.to_string().parse(), Ok(stage));
    }

    #[rstest]
    fn default_stage_is_requested() {
        assert_eq!(DocumentStage::default(), DocumentStage::Requested);
    }

    #[rstest]
    fn unknown_names_name_the_field() {
        let error = "transfer".parse::<TransferType>().unwrap_err();
        assert_eq!(
            error,
            ParamError::UnknownVariant {
                field: "type",
                value: "transfer".into()
            }
        );
    }
}
