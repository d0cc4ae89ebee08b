//! Binding properties of argument trees.

use proptest::prelude::*;
use sceptre_resolvers::{Argument, Resolver, StackAttr};
use sceptre_stack::{StackContext, StackRef};
use std::sync::Arc;

/// Generates random argument trees with resolvers at arbitrary positions.
fn arb_argument() -> impl Strategy<Value = Argument> {
    let leaf = prop_oneof![
        Just(Argument::Null),
        any::<bool>().prop_map(Argument::Bool),
        "[a-z]{0,8}".prop_map(Argument::String),
        Just(Argument::resolver(StackAttr::new("name"))),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Argument::List),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|entries| Argument::Map(entries.into_iter().collect())),
        ]
    })
}

fn bound_to(resolver: &dyn Resolver, stack: &StackRef) -> bool {
    resolver.stack().is_some_and(|own| Arc::ptr_eq(own, stack))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every resolver in a clone is bound to the new stack; the template's
    /// resolvers stay unbound.
    #[test]
    fn prop_clone_binds_every_resolver(argument in arb_argument()) {
        let stack = StackContext::named("prop/stack").into_ref();
        let clone = argument.clone_for_stack(&stack);

        prop_assert_eq!(clone.resolvers().len(), argument.resolvers().len());
        for resolver in clone.resolvers() {
            prop_assert!(bound_to(resolver, &stack));
        }
        for resolver in argument.resolvers() {
            prop_assert!(resolver.stack().is_none());
        }
    }

    /// Clones bound to different stacks resolve independently.
    #[test]
    fn prop_clones_do_not_share_resolvers(argument in arb_argument()) {
        let first = StackContext::named("first").into_ref();
        let second = StackContext::named("second").into_ref();
        let a = argument.clone_for_stack(&first);
        let b = a.clone_for_stack(&second);

        for resolver in a.resolvers() {
            prop_assert!(bound_to(resolver, &first));
        }
        for resolver in b.resolvers() {
            prop_assert!(bound_to(resolver, &second));
        }
    }
}

#[test]
fn list_elements_bind_in_place() {
    let stack = StackContext::named("my/stack").into_ref();
    let mut argument = Argument::List(vec![
        Argument::from("plain"),
        Argument::resolver(StackAttr::new("name")),
    ]);

    argument.bind(&stack);

    assert_eq!(
        argument.resolve().unwrap(),
        serde_json::json!(["plain", "my/stack"])
    );
}
