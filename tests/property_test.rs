use hierlog::module::normalize;
use hierlog::{Context, Level};
use proptest::prelude::*;

fn level() -> impl Strategy<Value = Level> {
    prop::sample::select(vec![
        Level::Unspecified,
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ])
}

fn module_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z]{1,4}", 1..4).prop_map(|segments| segments.join("."))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(name in "[ a-zA-Z.]{0,16}") {
        let once = normalize(&name);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert_eq!(once.to_lowercase(), once);
    }

    #[test]
    fn names_differing_in_case_share_a_module(name in module_name()) {
        let context = Context::empty();
        let lower = context.get_logger(&name.to_lowercase());
        let upper = context.get_logger(&name.to_uppercase());

        prop_assert_eq!(lower.module_id(), upper.module_id());
    }

    #[test]
    fn effective_level_is_nearest_specified_ancestor(
        name in module_name(),
        levels in prop::collection::vec(level(), 4),
        root in level(),
    ) {
        let context = Context::empty();
        let leaf = context.get_logger(&name);

        // Walk leaf → root, assigning one generated level per node.
        let mut chain = vec![leaf.clone()];
        while !chain[chain.len() - 1].module_id().is_root() {
            let parent = chain[chain.len() - 1].parent();
            chain.push(parent);
        }
        let root_logger = chain.pop().unwrap();
        root_logger.set_log_level(root);
        for (logger, level) in chain.iter().zip(&levels) {
            logger.set_log_level(*level);
        }

        let expected = chain
            .iter()
            .zip(&levels)
            .map(|(_, level)| *level)
            .find(|level| level.is_specified())
            .unwrap_or(root);

        prop_assert_eq!(leaf.effective_log_level(), expected);
    }

    #[test]
    fn config_string_is_sorted_by_name_and_round_trips(entries in prop::collection::btree_map(module_name(), level(), 0..6)) {
        let first = Context::empty();
        for (name, level) in &entries {
            first.get_logger(name).set_log_level(*level);
        }
        let info = first.logger_info();

        let mut expected = std::collections::BTreeMap::new();
        for (name, level) in &entries {
            expected.insert(normalize(name), *level);
        }
        let expected: Vec<String> = expected
            .into_iter()
            .filter(|(_, level)| level.is_specified())
            .map(|(name, level)| format!("{name}={level}"))
            .collect();
        prop_assert_eq!(&info, &expected.join(","));

        let second = Context::empty();
        second.configure_loggers(&info).unwrap();
        prop_assert_eq!(second.logger_info(), info);
    }
}
