use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::record::{AssetKind, AssetRecord};
use super::valuation::value_of;
use crate::error::LedgerError;
use crate::types::{sum_money, Money};
use crate::LedgerResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The fixed portfolio categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupKey {
    Investments,
    Crypto,
    RealEstate,
    Banking,
    Valuables,
    Liabilities,
}

impl GroupKey {
    pub const ALL: [GroupKey; 6] = [
        GroupKey::Investments,
        GroupKey::Crypto,
        GroupKey::RealEstate,
        GroupKey::Banking,
        GroupKey::Valuables,
        GroupKey::Liabilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Investments => "investments",
            GroupKey::Crypto => "crypto",
            GroupKey::RealEstate => "realEstate",
            GroupKey::Banking => "banking",
            GroupKey::Valuables => "valuables",
            GroupKey::Liabilities => "liabilities",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category of the group table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetGroup {
    pub key: GroupKey,
    pub types: BTreeSet<AssetKind>,
    /// Liability totals are subtracted from net worth and shown negated.
    pub liability: bool,
}

/// Group entry as written in a configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupSpec {
    #[serde(default)]
    types: Vec<AssetKind>,
    #[serde(default)]
    liability: Option<bool>,
}

/// Read-only mapping from asset types to portfolio categories.
///
/// Built once (from [`Default`] or a configuration file) and passed by
/// reference; every [`GroupKey`] is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetGroupTable {
    groups: Vec<AssetGroup>,
}

// ---------------------------------------------------------------------------
// Table construction
// ---------------------------------------------------------------------------

impl Default for AssetGroupTable {
    fn default() -> Self {
        use AssetKind::*;
        let spec = |key: GroupKey, types: &[AssetKind]| AssetGroup {
            key,
            types: types.iter().copied().collect(),
            liability: key == GroupKey::Liabilities,
        };
        AssetGroupTable {
            groups: vec![
                spec(GroupKey::Investments, &[Stock, Investment, MutualFund, Portfolio]),
                spec(GroupKey::Crypto, &[Crypto, Nft]),
                spec(GroupKey::RealEstate, &[Property]),
                spec(GroupKey::Banking, &[Bank, Insurance]),
                spec(GroupKey::Valuables, &[PreciousMetals, Diamond, Locker, Vehicle, Art]),
                spec(GroupKey::Liabilities, &[Loan, CreditCard]),
            ],
        }
    }
}

impl AssetGroupTable {
    /// Build a table from explicit groups. Missing keys get no types;
    /// a type listed under two groups is rejected.
    pub fn new(groups: Vec<AssetGroup>) -> LedgerResult<Self> {
        let mut by_key: BTreeMap<GroupKey, AssetGroup> = BTreeMap::new();
        for group in groups {
            if by_key.contains_key(&group.key) {
                return Err(LedgerError::InvalidConfig(format!(
                    "group '{}' is defined more than once",
                    group.key
                )));
            }
            by_key.insert(group.key, group);
        }

        let mut seen: BTreeMap<AssetKind, GroupKey> = BTreeMap::new();
        for group in by_key.values() {
            for kind in &group.types {
                if let Some(previous) = seen.insert(*kind, group.key) {
                    return Err(LedgerError::InvalidConfig(format!(
                        "asset type '{}' is listed in both '{}' and '{}'",
                        kind, previous, group.key
                    )));
                }
            }
        }

        let groups = GroupKey::ALL
            .iter()
            .map(|key| {
                by_key.remove(key).unwrap_or_else(|| AssetGroup {
                    key: *key,
                    types: BTreeSet::new(),
                    liability: *key == GroupKey::Liabilities,
                })
            })
            .collect();
        Ok(AssetGroupTable { groups })
    }

    fn from_specs(specs: BTreeMap<GroupKey, GroupSpec>) -> LedgerResult<Self> {
        let groups = specs
            .into_iter()
            .map(|(key, spec)| AssetGroup {
                key,
                types: spec.types.into_iter().collect(),
                liability: spec.liability.unwrap_or(key == GroupKey::Liabilities),
            })
            .collect();
        Self::new(groups)
    }

    /// Parse a table from YAML keyed by group name:
    ///
    /// ```yaml
    /// investments:
    ///   types: [stock, mutual_fund]
    /// liabilities:
    ///   types: [loan, credit_card]
    /// ```
    pub fn from_yaml_str(s: &str) -> LedgerResult<Self> {
        let specs: BTreeMap<GroupKey, GroupSpec> = serde_yaml::from_str(s)?;
        Self::from_specs(specs)
    }

    /// Parse a table from JSON with the same layout as [`Self::from_yaml_str`].
    pub fn from_json_str(s: &str) -> LedgerResult<Self> {
        let specs: BTreeMap<GroupKey, GroupSpec> = serde_json::from_str(s)?;
        Self::from_specs(specs)
    }

    pub fn groups(&self) -> &[AssetGroup] {
        &self.groups
    }

    pub fn get(&self, key: GroupKey) -> Option<&AssetGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// The group an asset type belongs to, if any.
    pub fn group_of(&self, kind: AssetKind) -> Option<&AssetGroup> {
        self.groups.iter().find(|g| g.types.contains(&kind))
    }

    pub fn is_liability(&self, key: GroupKey) -> bool {
        self.get(key).is_some_and(|g| g.liability)
    }
}

// ---------------------------------------------------------------------------
// Grouping and totals
// ---------------------------------------------------------------------------

/// Partition records into the table's groups, preserving input order.
///
/// Every key is present in the result. Records whose type belongs to no
/// group are left out.
pub fn group_by_category<'a>(
    table: &AssetGroupTable,
    assets: &'a [AssetRecord],
) -> BTreeMap<GroupKey, Vec<&'a AssetRecord>> {
    let mut grouped: BTreeMap<GroupKey, Vec<&'a AssetRecord>> =
        GroupKey::ALL.iter().map(|k| (*k, Vec::new())).collect();

    for asset in assets {
        match asset.kind().and_then(|kind| table.group_of(kind)) {
            Some(group) => grouped.entry(group.key).or_default().push(asset),
            None => tracing::debug!(asset = %asset.label(), "record matches no group; skipped"),
        }
    }

    grouped
}

/// Sum of current values over a group. Liability groups are summed as a
/// positive magnitude; see [`signed_total`]. The sum saturates at the
/// decimal range.
pub fn aggregate_group_total(assets: &[&AssetRecord]) -> Money {
    sum_money(assets.iter().map(|a| value_of(a, true)))
}

/// Group total with the display sign applied: liabilities are negated.
pub fn signed_total(group: &AssetGroup, total: Money) -> Money {
    if group.liability {
        -total
    } else {
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::record::{Debt, LumpSum, UnitHolding};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_table_covers_every_kind_once() {
        let table = AssetGroupTable::default();
        for kind in AssetKind::ALL {
            let owners = table
                .groups()
                .iter()
                .filter(|g| g.types.contains(&kind))
                .count();
            assert_eq!(owners, 1, "{kind} should belong to exactly one group");
        }
        assert_eq!(table.groups().len(), 6);
        assert!(table.is_liability(GroupKey::Liabilities));
        assert!(!table.is_liability(GroupKey::Investments));
    }

    #[test]
    fn test_group_of() {
        let table = AssetGroupTable::default();
        assert_eq!(table.group_of(AssetKind::Nft).unwrap().key, GroupKey::Crypto);
        assert_eq!(
            table.group_of(AssetKind::Property).unwrap().key,
            GroupKey::RealEstate
        );
    }

    #[test]
    fn test_group_by_category_drops_unrecognized() {
        let assets = vec![
            AssetRecord::Stock(UnitHolding {
                total_value: Some(dec!(1000)),
                ..Default::default()
            }),
            AssetRecord::Loan(Debt {
                principal_amount: Some(dec!(5000)),
                ..Default::default()
            }),
            AssetRecord::Unrecognized,
        ];
        let table = AssetGroupTable::default();
        let grouped = group_by_category(&table, &assets);

        assert_eq!(grouped.len(), 6);
        assert_eq!(grouped[&GroupKey::Investments].len(), 1);
        assert_eq!(grouped[&GroupKey::Liabilities].len(), 1);
        assert!(grouped[&GroupKey::Crypto].is_empty());
        let placed: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(placed, 2);

        assert_eq!(aggregate_group_total(&grouped[&GroupKey::Investments]), dec!(1000));
        assert_eq!(aggregate_group_total(&grouped[&GroupKey::Liabilities]), dec!(5000));
    }

    #[test]
    fn test_group_total_saturates() {
        let assets: Vec<AssetRecord> = (0..2)
            .map(|_| {
                AssetRecord::Bank(LumpSum {
                    current_total_value: Some(Decimal::MAX),
                    ..Default::default()
                })
            })
            .collect();
        let refs: Vec<&AssetRecord> = assets.iter().collect();
        assert_eq!(aggregate_group_total(&refs), Decimal::MAX);
    }

    #[test]
    fn test_signed_total() {
        let table = AssetGroupTable::default();
        let liabilities = table.get(GroupKey::Liabilities).unwrap();
        let banking = table.get(GroupKey::Banking).unwrap();
        assert_eq!(signed_total(liabilities, dec!(5000)), dec!(-5000));
        assert_eq!(signed_total(banking, dec!(5000)), dec!(5000));
    }

    #[test]
    fn test_from_yaml_partial_table() {
        let yaml = "investments:\n  types: [stock]\nliabilities:\n  types: [loan]\n";
        let table = AssetGroupTable::from_yaml_str(yaml).unwrap();
        assert_eq!(table.groups().len(), 6);
        assert!(table.group_of(AssetKind::CreditCard).is_none());
        assert!(table.get(GroupKey::Banking).unwrap().types.is_empty());
        assert!(table.is_liability(GroupKey::Liabilities));
    }

    #[test]
    fn test_from_json_liability_override() {
        let json = r#"{"valuables": {"types": ["art"], "liability": false},
                       "banking": {"types": ["credit_card"], "liability": true}}"#;
        let table = AssetGroupTable::from_json_str(json).unwrap();
        assert!(table.is_liability(GroupKey::Banking));
        assert_eq!(
            table.group_of(AssetKind::CreditCard).unwrap().key,
            GroupKey::Banking
        );
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let yaml = "investments:\n  types: [stock]\ncrypto:\n  types: [stock]\n";
        let err = AssetGroupTable::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_group_rejected() {
        let yaml = "pensions:\n  types: [bank]\n";
        let err = AssetGroupTable::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, LedgerError::SerializationError(_)));
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let group = AssetGroup {
            key: GroupKey::Crypto,
            types: BTreeSet::new(),
            liability: false,
        };
        assert!(AssetGroupTable::new(vec![group.clone(), group]).is_err());
    }
}
