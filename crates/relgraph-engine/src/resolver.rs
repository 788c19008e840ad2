//! Relationship resolution
//!
//! Splits the Attributes table into the focal entity's outgoing and incoming
//! relationship rows. Target lists are parsed once at load time by
//! [`parse_relationship_targets`], so both directions share the same
//! tokenisation.
//!
//! Matching is exact and case-sensitive: `"account"` does not refer to
//! `Account`, and `AccountHistory` never matches `Account`.

use relgraph_core::{AttributeRecord, Direction, RelationshipEdge};

pub use relgraph_core::parse_relationship_targets;

/// Whether an attribute names `entity` as one of its relationship targets
pub fn references(attribute: &AttributeRecord, entity: &str) -> bool {
    attribute.relationship_targets.iter().any(|t| t == entity)
}

/// Outgoing and incoming relationship rows of one focal entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelationships<'a> {
    /// Focal entity name
    pub focal_entity: &'a str,

    /// Relationship rows owned by the focal entity
    pub outgoing: Vec<&'a AttributeRecord>,

    /// Rows of any entity whose targets include the focal entity
    pub incoming: Vec<&'a AttributeRecord>,
}

impl<'a> ResolvedRelationships<'a> {
    /// Flatten both views into relationship assertions
    ///
    /// One assertion per (outgoing row, target) followed by one per incoming
    /// row, in row order.
    pub fn assertions(&self) -> Vec<RelationshipEdge> {
        let outgoing = self.outgoing.iter().flat_map(|attr| {
            attr.relationship_targets.iter().map(move |target| RelationshipEdge {
                source_entity: self.focal_entity.to_string(),
                target_entity: target.clone(),
                via_field: attr.field_name.clone(),
                direction: Direction::Outgoing,
            })
        });

        let incoming = self.incoming.iter().map(|attr| RelationshipEdge {
            source_entity: attr.owner_entity.clone(),
            target_entity: self.focal_entity.to_string(),
            via_field: attr.field_name.clone(),
            direction: Direction::Incoming,
        });

        outgoing.chain(incoming).collect()
    }

    /// Distinct outgoing targets in first-seen order
    pub fn outgoing_targets(&self) -> Vec<&'a str> {
        let mut targets: Vec<&'a str> = Vec::new();
        for target in self.outgoing.iter().copied().flat_map(|a| a.relationship_targets.iter()) {
            if !targets.contains(&target.as_str()) {
                targets.push(target.as_str());
            }
        }
        targets
    }

    /// Distinct owners of incoming rows in first-seen order
    pub fn incoming_sources(&self) -> Vec<&'a str> {
        let mut sources: Vec<&'a str> = Vec::new();
        for attr in self.incoming.iter().copied() {
            if !sources.contains(&attr.owner_entity.as_str()) {
                sources.push(attr.owner_entity.as_str());
            }
        }
        sources
    }
}

/// Resolves relationship rows against a focal entity
pub struct RelationshipResolver;

impl RelationshipResolver {
    /// Classify the Attributes table for `focal_entity`
    ///
    /// A self-referencing field on the focal entity (e.g. `Account.ParentId ->
    /// Account`) appears in both views and yields one edge in each direction.
    pub fn resolve<'a>(attributes: &'a [AttributeRecord], focal_entity: &'a str) -> ResolvedRelationships<'a> {
        let outgoing: Vec<&AttributeRecord> = attributes
            .iter()
            .filter(|a| a.owner_entity == focal_entity && a.is_relationship())
            .collect();

        let incoming: Vec<&AttributeRecord> = attributes
            .iter()
            .filter(|a| references(a, focal_entity))
            .collect();

        tracing::debug!(
            focal = focal_entity,
            outgoing = outgoing.len(),
            incoming = incoming.len(),
            "Resolved relationship rows"
        );

        ResolvedRelationships {
            focal_entity,
            outgoing,
            incoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup(owner: &str, field: &str, refers_to: &str) -> AttributeRecord {
        AttributeRecord::with_raw_targets(owner, field, "Lookup", refers_to)
    }

    #[test]
    fn whole_token_matching() {
        let attr = lookup("Task", "WhatId", "AccountHistory, Opportunity");
        assert!(!references(&attr, "Account"));
        assert!(references(&attr, "Opportunity"));

        let attr = lookup("Task", "WhatId", "Account, Contact, Lead");
        assert!(references(&attr, "Account"));
        assert!(references(&attr, "Lead"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let attr = lookup("Case", "AccountId", "account");
        assert!(!references(&attr, "Account"));
    }

    #[test]
    fn resolve_splits_outgoing_and_incoming() {
        let attributes = vec![
            AttributeRecord::plain("Account", "Name", "Text"),
            lookup("Account", "PrimaryContact", "Contact"),
            lookup("Contact", "AccountId", "Account"),
            lookup("AccountTeamMember", "UserId", "User"),
            lookup("Opportunity", "AccountHistoryId", "AccountHistory"),
        ];

        let resolved = RelationshipResolver::resolve(&attributes, "Account");

        let outgoing: Vec<_> = resolved.outgoing.iter().map(|a| a.field_name.as_str()).collect();
        let incoming: Vec<_> = resolved.incoming.iter().map(|a| a.field_name.as_str()).collect();
        assert_eq!(outgoing, vec!["PrimaryContact"]);
        assert_eq!(incoming, vec!["AccountId"]);
    }

    #[test]
    fn polymorphic_outgoing_field_yields_one_assertion_per_target() {
        let attributes = vec![lookup("Account", "RelatedTo", "Contact, Lead")];
        let resolved = RelationshipResolver::resolve(&attributes, "Account");

        let assertions = resolved.assertions();
        assert_eq!(assertions.len(), 2);
        assert!(assertions.iter().all(|a| a.via_field == "RelatedTo"));
        assert_eq!(assertions[0].target_entity, "Contact");
        assert_eq!(assertions[1].target_entity, "Lead");
        assert_eq!(resolved.outgoing_targets(), vec!["Contact", "Lead"]);
    }

    #[test]
    fn polymorphic_incoming_field_yields_single_assertion() {
        let attributes = vec![lookup("Task", "WhatId", "Account, Contact, Lead")];
        let resolved = RelationshipResolver::resolve(&attributes, "Account");

        assert_eq!(
            resolved.assertions(),
            vec![RelationshipEdge {
                source_entity: "Task".to_string(),
                target_entity: "Account".to_string(),
                via_field: "WhatId".to_string(),
                direction: Direction::Incoming,
            }]
        );
        assert!(resolved.outgoing_targets().is_empty());
    }

    #[test]
    fn self_reference_appears_in_both_views() {
        let attributes = vec![lookup("Account", "ParentId", "Account")];
        let resolved = RelationshipResolver::resolve(&attributes, "Account");

        let directions: Vec<_> = resolved.assertions().iter().map(|a| a.direction).collect();
        assert_eq!(directions, vec![Direction::Outgoing, Direction::Incoming]);
        assert_eq!(resolved.incoming_sources(), vec!["Account"]);
    }

    #[test]
    fn distinct_sources_keep_first_seen_order() {
        let attributes = vec![
            lookup("Case", "AccountId", "Account"),
            lookup("Contact", "AccountId", "Account"),
            lookup("Case", "ParentAccountId", "Account"),
        ];
        let resolved = RelationshipResolver::resolve(&attributes, "Account");
        assert_eq!(resolved.incoming_sources(), vec!["Case", "Contact"]);
        assert_eq!(resolved.assertions().len(), 3);
    }
}
