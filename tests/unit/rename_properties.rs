//! Rename behaviour over several document shapes.

use kubemerge_cli::kubeconfig::KubeConfig;
use kubemerge_cli::test_utils::KubeConfigBuilder;

fn documents() -> Vec<KubeConfig> {
    vec![
        KubeConfigBuilder::new()
            .cluster("kind-kind", "https://127.0.0.1:6443")
            .user("kind-kind", "t")
            .context("kind-kind", "kind-kind", "kind-kind")
            .current_context("kind-kind")
            .build(),
        KubeConfigBuilder::new()
            .context("a", "c", "u")
            .context("b", "c", "u")
            .context("c", "c", "u")
            .current_context("b")
            .build(),
        KubeConfigBuilder::new()
            .context("only", "c", "u")
            .extension("preferences", serde_yaml::Mapping::new())
            .build(),
    ]
}

#[test]
fn rename_present_context_yields_exactly_one_new_name() {
    for mut doc in documents() {
        let old = doc.contexts.last().unwrap().name.clone();
        let count_before = doc.contexts.len();

        assert!(doc.rename_context(&old, "renamed"));

        assert_eq!(doc.current_context, "renamed");
        assert_eq!(doc.contexts.len(), count_before);
        assert_eq!(doc.contexts.iter().filter(|c| c.name == "renamed").count(), 1);
        assert!(doc.has_valid_selection());
    }
}

#[test]
fn rename_absent_context_is_a_no_op() {
    for mut doc in documents() {
        let before_yaml = doc.to_yaml().unwrap();

        assert!(!doc.rename_context("does-not-exist", "renamed"));

        assert_eq!(doc.to_yaml().unwrap(), before_yaml);
    }
}

#[test]
fn rename_keeps_other_contexts_in_order() {
    let mut doc = documents().remove(1);

    doc.rename_context("b", "middle");

    assert_eq!(doc.context_names(), vec!["a", "middle", "c"]);
}
