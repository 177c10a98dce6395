//! Merge invariants: append-only users and contexts, cluster upsert and
//! insert, and current-context handling.

use kubemerge_cli::kubeconfig::{KubeConfig, merge_kubeconfigs};
use kubemerge_cli::test_utils::{KubeConfigBuilder, cluster, init_test_logging};

fn server_of<'a>(config: &'a KubeConfig, name: &str) -> Option<&'a str> {
    config.find_cluster(name)?.nested_str("cluster", "server")
}

fn pairs() -> Vec<(KubeConfig, KubeConfig)> {
    let dest = KubeConfigBuilder::new()
        .cluster("c1", "https://old")
        .user("u1", "t1")
        .context("ctx1", "c1", "u1")
        .current_context("ctx1")
        .build();

    vec![
        (
            dest.clone(),
            KubeConfigBuilder::new()
                .cluster("c1", "https://new")
                .cluster("c2", "https://c2.example.com")
                .user("u2", "t2")
                .context("ctx2", "c2", "u2")
                .current_context("ctx2")
                .build(),
        ),
        (dest.clone(), KubeConfigBuilder::new().build()),
        (
            KubeConfigBuilder::new().build(),
            KubeConfigBuilder::new()
                .cluster("c3", "https://c3")
                .user("u3", "t3")
                .user("u3", "t3-again")
                .context("ctx3", "c3", "u3")
                .current_context("ctx3")
                .build(),
        ),
        (
            dest,
            KubeConfigBuilder::new()
                .user("u1", "t1-dup")
                .context("ctx1", "c1", "u1")
                .build(),
        ),
    ]
}

#[test]
fn users_and_contexts_are_append_only() {
    init_test_logging(None);
    for (mut dest, incoming) in pairs() {
        let users_before = dest.users.clone();
        let contexts_before = dest.contexts.clone();
        let incoming_users = incoming.users.clone();
        let incoming_contexts = incoming.contexts.clone();

        merge_kubeconfigs(&mut dest, incoming, None).unwrap();

        assert_eq!(dest.users.len(), users_before.len() + incoming_users.len());
        assert_eq!(dest.contexts.len(), contexts_before.len() + incoming_contexts.len());
        assert_eq!(&dest.users[..users_before.len()], &users_before[..]);
        assert_eq!(&dest.users[users_before.len()..], &incoming_users[..]);
        assert_eq!(&dest.contexts[contexts_before.len()..], &incoming_contexts[..]);
    }
}

#[test]
fn shared_cluster_is_upserted_not_duplicated() {
    for override_server in [None, Some("https://override")] {
        for (mut dest, incoming) in pairs() {
            let shared: Vec<String> = incoming
                .clusters
                .iter()
                .filter(|c| dest.find_cluster(&c.name).is_some())
                .map(|c| c.name.clone())
                .collect();
            let servers_before: Vec<Option<String>> = shared
                .iter()
                .map(|name| server_of(&dest, name).map(str::to_string))
                .collect();
            let new_count = incoming.clusters.len() - shared.len();
            let count_before = dest.clusters.len();

            merge_kubeconfigs(&mut dest, incoming, override_server).unwrap();

            assert_eq!(dest.clusters.len(), count_before + new_count);
            for (name, before) in shared.iter().zip(servers_before) {
                let expected = override_server.map(str::to_string).or(before);
                assert_eq!(server_of(&dest, name).map(str::to_string), expected);
            }
        }
    }
}

#[test]
fn new_clusters_appear_unchanged() {
    for (mut dest, incoming) in pairs() {
        let new_clusters: Vec<_> = incoming
            .clusters
            .iter()
            .filter(|c| dest.find_cluster(&c.name).is_none())
            .cloned()
            .collect();

        merge_kubeconfigs(&mut dest, incoming, Some("https://override")).unwrap();

        for cluster in new_clusters {
            assert_eq!(dest.find_cluster(&cluster.name), Some(&cluster));
        }
    }
}

#[test]
fn current_context_follows_non_empty_incoming_selection() {
    for (mut dest, incoming) in pairs() {
        let expected = if incoming.current_context.is_empty() {
            dest.current_context.clone()
        } else {
            incoming.current_context.clone()
        };

        merge_kubeconfigs(&mut dest, incoming, None).unwrap();

        assert_eq!(dest.current_context, expected);
        assert!(dest.has_valid_selection());
    }
}

#[test]
fn documented_override_scenario() {
    let mut dest = KubeConfigBuilder::new().cluster("c1", "https://old").build();
    let incoming = KubeConfigBuilder::new()
        .cluster("c1", "https://new")
        .cluster("c2", "https://c2.example.com")
        .build();

    merge_kubeconfigs(&mut dest, incoming, Some("https://updated")).unwrap();

    assert_eq!(dest.clusters.len(), 2);
    assert_eq!(server_of(&dest, "c1"), Some("https://updated"));
    assert_eq!(dest.clusters[1], cluster("c2", "https://c2.example.com"));
}
