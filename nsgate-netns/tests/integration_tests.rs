use std::path::PathBuf;

use nsgate_core::{CallerIdentity, Pid};
use nsgate_netns::{ownership, resolver, AllowedProgram, NamespaceSelector, OwnerClaim, Policy};

fn explicit(path: &str) -> NamespaceSelector {
    NamespaceSelector::ExplicitPath(PathBuf::from(path))
}

#[test]
fn test_pid_and_explicit_path_authorize_identically() {
    let caller = CallerIdentity::current();
    let pid = Pid::current();

    let by_pid = resolver::resolve(&NamespaceSelector::ByPid(pid)).unwrap();
    let by_path = resolver::resolve(&explicit(&format!("/proc/{pid}/ns/net"))).unwrap();

    assert_eq!(by_pid, by_path);
    assert_eq!(
        ownership::authorize(&by_pid, &caller).is_ok(),
        ownership::authorize(&by_path, &caller).is_ok()
    );
}

#[test]
fn test_shape_b_claim_carries_embedded_uid() {
    let resolved = resolver::resolve(&explicit("/run/user/1000/netns/vpn0")).unwrap();

    match resolved.owner_claim {
        OwnerClaim::RuntimeDir { claimed_uid } => assert_eq!(claimed_uid.as_raw(), 1000),
        OwnerClaim::ProcDir(_) => panic!("shape B must not produce a proc-dir claim"),
    }
}

#[test]
fn test_other_namespace_types_rejected() {
    for ns in ["pid", "mnt", "uts", "ipc", "user", "cgroup"] {
        assert!(
            resolver::resolve(&explicit(&format!("/proc/4242/ns/{ns}"))).is_err(),
            "{ns} namespace handle must be rejected"
        );
    }
}

#[test]
fn test_default_policy_membership() {
    let policy = Policy::default();
    for program in ["ip", "curl", "systemd-socket-proxyd"] {
        assert!(
            policy.check_command(&[program.to_string()]).is_ok(),
            "{program} should be in the default allowlist"
        );
    }
    assert!(policy.check_command(&["bash".to_string()]).is_err());
}

#[test]
fn test_policy_round_trips_through_deployment_config() {
    let shipped = serde_json::to_string(&Policy::empty().with_program(AllowedProgram::Curl)).unwrap();
    let policy: Policy = serde_json::from_str(&shipped).unwrap();

    assert!(policy.check_command(&["curl".to_string()]).is_ok());
    assert!(policy
        .check_command(&["systemd-socket-proxyd".to_string()])
        .is_err());
}
