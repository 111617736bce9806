// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed networking-rule payloads
//!
//! ACL and security group rules carry one matcher block per protocol, all
//! null except the selected protocol. Updates hard-reset every block before
//! applying the new protocol so stale ports can never survive a protocol
//! change.

use crate::config::{
    AclPortBlock, AclRule, Direction, IcmpBlock, PortBlock, RuleAction, SgRule,
};

/// Port matcher for a rule update. Source ports only apply to ACL rules.
#[derive(Debug, Clone, Default)]
pub struct PortRange {
    pub port_min: Option<u32>,
    pub port_max: Option<u32>,
    pub source_port_min: Option<u32>,
    pub source_port_max: Option<u32>,
}

/// Protocol selection for a rule create or save
#[derive(Debug, Clone)]
pub enum RuleProtocol {
    All,
    Icmp { type_: Option<u32>, code: Option<u32> },
    Tcp(PortRange),
    Udp(PortRange),
}

/// Parameters for network ACL rule mutations
#[derive(Debug, Clone)]
pub struct AclRuleParams {
    pub name: String,
    pub action: RuleAction,
    pub direction: Direction,
    pub source: String,
    pub destination: String,
    pub protocol: RuleProtocol,
}

/// Parameters for security group rule mutations
#[derive(Debug, Clone)]
pub struct SgRuleParams {
    pub name: String,
    pub direction: Direction,
    pub source: String,
    pub protocol: RuleProtocol,
}

pub(crate) fn build_acl_rule(params: &AclRuleParams) -> AclRule {
    let mut rule = AclRule {
        action: params.action,
        destination: params.destination.clone(),
        direction: params.direction,
        name: params.name.clone(),
        source: params.source.clone(),
        icmp: IcmpBlock::default(),
        tcp: AclPortBlock::default(),
        udp: AclPortBlock::default(),
    };
    apply_acl_protocol(&mut rule, &params.protocol);
    rule
}

pub(crate) fn apply_acl_rule(rule: &mut AclRule, params: &AclRuleParams) {
    rule.action = params.action;
    rule.direction = params.direction;
    rule.name = params.name.clone();
    rule.source = params.source.clone();
    rule.destination = params.destination.clone();
    rule.icmp = IcmpBlock::default();
    rule.tcp = AclPortBlock::default();
    rule.udp = AclPortBlock::default();
    apply_acl_protocol(rule, &params.protocol);
}

fn apply_acl_protocol(rule: &mut AclRule, protocol: &RuleProtocol) {
    match protocol {
        RuleProtocol::All => {}
        RuleProtocol::Icmp { type_, code } => {
            rule.icmp = IcmpBlock {
                type_: *type_,
                code: *code,
            };
        }
        RuleProtocol::Tcp(range) => rule.tcp = acl_ports(range),
        RuleProtocol::Udp(range) => rule.udp = acl_ports(range),
    }
}

fn acl_ports(range: &PortRange) -> AclPortBlock {
    AclPortBlock {
        port_min: range.port_min,
        port_max: range.port_max,
        source_port_min: range.source_port_min,
        source_port_max: range.source_port_max,
    }
}

pub(crate) fn build_sg_rule(params: &SgRuleParams) -> SgRule {
    let mut rule = SgRule {
        direction: params.direction,
        name: params.name.clone(),
        source: params.source.clone(),
        icmp: IcmpBlock::default(),
        tcp: PortBlock::default(),
        udp: PortBlock::default(),
    };
    apply_sg_protocol(&mut rule, &params.protocol);
    rule
}

pub(crate) fn apply_sg_rule(rule: &mut SgRule, params: &SgRuleParams) {
    rule.direction = params.direction;
    rule.name = params.name.clone();
    rule.source = params.source.clone();
    rule.icmp = IcmpBlock::default();
    rule.tcp = PortBlock::default();
    rule.udp = PortBlock::default();
    apply_sg_protocol(rule, &params.protocol);
}

fn apply_sg_protocol(rule: &mut SgRule, protocol: &RuleProtocol) {
    match protocol {
        RuleProtocol::All => {}
        RuleProtocol::Icmp { type_, code } => {
            rule.icmp = IcmpBlock {
                type_: *type_,
                code: *code,
            };
        }
        // security group rules never match source ports
        RuleProtocol::Tcp(range) => {
            rule.tcp = PortBlock {
                port_min: range.port_min,
                port_max: range.port_max,
            };
        }
        RuleProtocol::Udp(range) => {
            rule.udp = PortBlock {
                port_min: range.port_min,
                port_max: range.port_max,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tcp_443() -> RuleProtocol {
        RuleProtocol::Tcp(PortRange {
            port_min: Some(443),
            port_max: Some(443),
            ..PortRange::default()
        })
    }

    #[test]
    fn protocol_change_resets_stale_ports() {
        let mut rule = build_sg_rule(&SgRuleParams {
            name: "allow-https".to_string(),
            direction: Direction::Inbound,
            source: "0.0.0.0/0".to_string(),
            protocol: tcp_443(),
        });
        assert_eq!(rule.tcp.port_min, Some(443));

        apply_sg_rule(
            &mut rule,
            &SgRuleParams {
                name: "allow-ping".to_string(),
                direction: Direction::Inbound,
                source: "0.0.0.0/0".to_string(),
                protocol: RuleProtocol::Icmp {
                    type_: Some(8),
                    code: None,
                },
            },
        );
        assert_eq!(rule.tcp, PortBlock::default());
        assert_eq!(rule.icmp.type_, Some(8));
        assert_eq!(rule.name, "allow-ping");
    }

    #[test]
    fn all_protocol_clears_every_block() {
        let mut rule = build_acl_rule(&AclRuleParams {
            name: "allow-all".to_string(),
            action: RuleAction::Allow,
            direction: Direction::Outbound,
            source: "10.0.0.0/8".to_string(),
            destination: "0.0.0.0/0".to_string(),
            protocol: tcp_443(),
        });
        apply_acl_rule(
            &mut rule,
            &AclRuleParams {
                name: "allow-all".to_string(),
                action: RuleAction::Allow,
                direction: Direction::Outbound,
                source: "10.0.0.0/8".to_string(),
                destination: "0.0.0.0/0".to_string(),
                protocol: RuleProtocol::All,
            },
        );
        assert_eq!(rule.tcp, AclPortBlock::default());
        assert_eq!(rule.icmp, IcmpBlock::default());
    }
}
