use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::types::Money;

// ---------------------------------------------------------------------------
// Asset types
// ---------------------------------------------------------------------------

/// The recognized asset and liability types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Stock,
    Investment,
    MutualFund,
    Crypto,
    Portfolio,
    Nft,
    Property,
    Bank,
    PreciousMetals,
    Diamond,
    Locker,
    Insurance,
    Vehicle,
    Art,
    Loan,
    CreditCard,
}

impl AssetKind {
    pub const ALL: [AssetKind; 16] = [
        AssetKind::Stock,
        AssetKind::Investment,
        AssetKind::MutualFund,
        AssetKind::Crypto,
        AssetKind::Portfolio,
        AssetKind::Nft,
        AssetKind::Property,
        AssetKind::Bank,
        AssetKind::PreciousMetals,
        AssetKind::Diamond,
        AssetKind::Locker,
        AssetKind::Insurance,
        AssetKind::Vehicle,
        AssetKind::Art,
        AssetKind::Loan,
        AssetKind::CreditCard,
    ];

    /// Wire name, as carried in the record's `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Stock => "stock",
            AssetKind::Investment => "investment",
            AssetKind::MutualFund => "mutual_fund",
            AssetKind::Crypto => "crypto",
            AssetKind::Portfolio => "portfolio",
            AssetKind::Nft => "nft",
            AssetKind::Property => "property",
            AssetKind::Bank => "bank",
            AssetKind::PreciousMetals => "precious_metals",
            AssetKind::Diamond => "diamond",
            AssetKind::Locker => "locker",
            AssetKind::Insurance => "insurance",
            AssetKind::Vehicle => "vehicle",
            AssetKind::Art => "art",
            AssetKind::Loan => "loan",
            AssetKind::CreditCard => "credit_card",
        }
    }

    pub fn is_liability(&self) -> bool {
        matches!(self, AssetKind::Loan | AssetKind::CreditCard)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Valuation shapes
// ---------------------------------------------------------------------------

/// Backend ids arrive either as strings or as integers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

/// Holdings priced per unit: shares, fund units, coins, tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitHolding {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_unit_price: Option<Money>,
}

/// Holdings recorded as a single amount: accounts, policies, vehicles, art.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LumpSum {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Money>,
}

/// Real estate priced by area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaHolding {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_area: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price_per_area: Option<Money>,
}

/// Metals and stones priced by weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightHolding {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_unit_price: Option<Money>,
}

/// Loans and card balances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_total_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_amount: Option<Money>,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// An asset or liability record as delivered by the backend, keyed by `type`.
///
/// Each variant carries only the fields its valuation can use. Records with
/// a `type` outside the known set deserialize to [`AssetRecord::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetRecord {
    Stock(UnitHolding),
    Investment(UnitHolding),
    MutualFund(UnitHolding),
    Crypto(UnitHolding),
    Nft(UnitHolding),
    Portfolio(LumpSum),
    Bank(LumpSum),
    Locker(LumpSum),
    Insurance(LumpSum),
    Vehicle(LumpSum),
    Art(LumpSum),
    Property(AreaHolding),
    PreciousMetals(WeightHolding),
    Diamond(WeightHolding),
    Loan(Debt),
    CreditCard(Debt),
    #[serde(other)]
    Unrecognized,
}

/// Borrowed view of a record's valuation shape.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Units(&'a UnitHolding),
    Lump(&'a LumpSum),
    Area(&'a AreaHolding),
    Weight(&'a WeightHolding),
    Debt(&'a Debt),
    None,
}

impl AssetRecord {
    /// The record's type, or `None` for unrecognized records.
    pub fn kind(&self) -> Option<AssetKind> {
        Some(match self {
            AssetRecord::Stock(_) => AssetKind::Stock,
            AssetRecord::Investment(_) => AssetKind::Investment,
            AssetRecord::MutualFund(_) => AssetKind::MutualFund,
            AssetRecord::Crypto(_) => AssetKind::Crypto,
            AssetRecord::Nft(_) => AssetKind::Nft,
            AssetRecord::Portfolio(_) => AssetKind::Portfolio,
            AssetRecord::Bank(_) => AssetKind::Bank,
            AssetRecord::Locker(_) => AssetKind::Locker,
            AssetRecord::Insurance(_) => AssetKind::Insurance,
            AssetRecord::Vehicle(_) => AssetKind::Vehicle,
            AssetRecord::Art(_) => AssetKind::Art,
            AssetRecord::Property(_) => AssetKind::Property,
            AssetRecord::PreciousMetals(_) => AssetKind::PreciousMetals,
            AssetRecord::Diamond(_) => AssetKind::Diamond,
            AssetRecord::Loan(_) => AssetKind::Loan,
            AssetRecord::CreditCard(_) => AssetKind::CreditCard,
            AssetRecord::Unrecognized => return None,
        })
    }

    pub fn shape(&self) -> Shape<'_> {
        match self {
            AssetRecord::Stock(h)
            | AssetRecord::Investment(h)
            | AssetRecord::MutualFund(h)
            | AssetRecord::Crypto(h)
            | AssetRecord::Nft(h) => Shape::Units(h),
            AssetRecord::Portfolio(l)
            | AssetRecord::Bank(l)
            | AssetRecord::Locker(l)
            | AssetRecord::Insurance(l)
            | AssetRecord::Vehicle(l)
            | AssetRecord::Art(l) => Shape::Lump(l),
            AssetRecord::Property(a) => Shape::Area(a),
            AssetRecord::PreciousMetals(w) | AssetRecord::Diamond(w) => Shape::Weight(w),
            AssetRecord::Loan(d) | AssetRecord::CreditCard(d) => Shape::Debt(d),
            AssetRecord::Unrecognized => Shape::None,
        }
    }

    fn labels(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        macro_rules! of {
            ($r:expr) => {
                ($r.id.as_deref(), $r.name.as_deref(), $r.purchase_currency.as_deref())
            };
        }
        match self.shape() {
            Shape::Units(r) => of!(r),
            Shape::Lump(r) => of!(r),
            Shape::Area(r) => of!(r),
            Shape::Weight(r) => of!(r),
            Shape::Debt(r) => of!(r),
            Shape::None => (None, None, None),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.labels().0
    }

    pub fn name(&self) -> Option<&str> {
        self.labels().1
    }

    pub fn purchase_currency(&self) -> Option<&str> {
        self.labels().2
    }

    pub fn is_liability(&self) -> bool {
        self.kind().is_some_and(|k| k.is_liability())
    }

    /// Human-readable label for messages: name, then id, then type.
    pub fn label(&self) -> String {
        match (self.name(), self.id(), self.kind()) {
            (Some(name), _, _) => name.to_string(),
            (None, Some(id), _) => id.to_string(),
            (None, None, Some(kind)) => kind.to_string(),
            (None, None, None) => "unrecognized record".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_stock() {
        let rec: AssetRecord = serde_json::from_str(
            r#"{"type":"stock","name":"ACME","quantity":10,"unit_price":"12.5","purchase_currency":"INR"}"#,
        )
        .unwrap();
        assert_eq!(rec.kind(), Some(AssetKind::Stock));
        assert_eq!(rec.name(), Some("ACME"));
        assert_eq!(rec.purchase_currency(), Some("INR"));
        match rec {
            AssetRecord::Stock(h) => {
                assert_eq!(h.quantity, Some(dec!(10)));
                assert_eq!(h.unit_price, Some(dec!(12.5)));
                assert_eq!(h.current_unit_price, None);
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_numeric_id() {
        let rec: AssetRecord =
            serde_json::from_str(r#"{"type":"bank","id":42,"total_value":10}"#).unwrap();
        assert_eq!(rec.id(), Some("42"));
        assert_eq!(rec.label(), "42");
    }

    #[test]
    fn test_deserialize_unknown_type() {
        let rec: AssetRecord =
            serde_json::from_str(r#"{"type":"unknown_type","total_value":999}"#).unwrap();
        assert_eq!(rec, AssetRecord::Unrecognized);
        assert_eq!(rec.kind(), None);
        assert_eq!(rec.label(), "unrecognized record");
    }

    #[test]
    fn test_null_fields_are_absent() {
        let rec: AssetRecord = serde_json::from_str(
            r#"{"type":"loan","principal_amount":5000,"current_value":null}"#,
        )
        .unwrap();
        match rec {
            AssetRecord::Loan(d) => {
                assert_eq!(d.principal_amount, Some(dec!(5000)));
                assert_eq!(d.current_value, None);
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_kind_wire_names_match_serde() {
        for kind in AssetKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_liability_kinds() {
        assert!(AssetKind::Loan.is_liability());
        assert!(AssetKind::CreditCard.is_liability());
        assert!(!AssetKind::Property.is_liability());
        assert!(AssetRecord::CreditCard(Debt::default()).is_liability());
        assert!(!AssetRecord::Unrecognized.is_liability());
    }

    #[test]
    fn test_label_fallbacks() {
        let named = AssetRecord::Bank(LumpSum {
            name: Some("Savings".into()),
            id: Some("b-1".into()),
            ..Default::default()
        });
        assert_eq!(named.label(), "Savings");
        let by_id = AssetRecord::Bank(LumpSum {
            id: Some("b-1".into()),
            ..Default::default()
        });
        assert_eq!(by_id.label(), "b-1");
        assert_eq!(AssetRecord::Art(LumpSum::default()).label(), "art");
    }
}
