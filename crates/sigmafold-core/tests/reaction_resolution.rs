//! Alias-convergence coverage: every notation accepted for one physical
//! reaction channel resolves to that channel's single canonical key.

use sigmafold_core::{resolve_reaction, ReactionNameError};

fn assert_all_resolve_to(expected: &str, inputs: &[&str]) {
    for input in inputs {
        let key = resolve_reaction(input).expect(input);
        assert_eq!(
            key.as_str(),
            expected,
            "'{input}' resolved to '{key}', expected '{expected}'"
        );
    }
}

#[test]
fn deuterium_tritium_notations_converge() {
    assert_all_resolve_to(
        "D+T",
        &["DT", "D+T", "D+T→n+α", "D+T→α+n", "t(d,n)a", "T+D", "²H+³H"],
    );
}

#[test]
fn deuterium_helium_notations_converge() {
    assert_all_resolve_to(
        "D+3He",
        &[
            "DHe3",
            "DHe",
            "D3He",
            "D+3He",
            "D+³He",
            "D+³He→p+⁴He",
            "D+³He→p+α",
            "D+³He→α+p",
            "D+³He->a+p",
            "h(d,p)a",
        ],
    );
}

#[test]
fn deuterium_deuterium_tritium_branch_notations_converge() {
    assert_all_resolve_to(
        "D+D→p+T",
        &[
            "D+D→p+T",
            "D+D→T+p",
            "²H+²H→³H+¹H",
            "²H+²H→¹H+³H",
            "d(d,p)t",
        ],
    );
}

#[test]
fn deuterium_deuterium_helion_branch_notations_converge() {
    assert_all_resolve_to(
        "D+D→n+3He",
        &[
            "D(d,n)3He",
            "D+D→n+3He",
            "D+D→3He+n",
            "²H+²H→n+3He",
            "²H+²H→3He+n",
            "d(d,n)h",
        ],
    );
}

#[test]
fn tritium_tritium_notations_converge() {
    assert_all_resolve_to("T+T", &["2T", "T+T", "T + T -> a + 2n", "t(t,2n)a"]);
}

#[test]
fn proton_boron_notations_converge() {
    assert_all_resolve_to(
        "p+11B",
        &["pB", "pB11", "p+B", "p+11B", "p+11B→3α", "p+11B→3 ⁴He"],
    );
}

#[test]
fn helion_tritium_branch_notations_converge() {
    assert_all_resolve_to(
        "3He+T→p+n+4He",
        &["³He(t,pn)⁴He", "h + t -> p + n + a", "h(t,pn)a", "h(t,np)a"],
    );
    assert_all_resolve_to(
        "3He+T→D+4He",
        &["³He(t,d)⁴He", "h + t -> d + a", "h(t,d)a"],
    );
}

#[test]
fn helion_helion_notations_converge() {
    assert_all_resolve_to("3He+3He", &["³He(h,2p)⁴He", "h + h -> 2 p + a", "h(h,2p)a"]);
}

#[test]
fn proton_lithium_notations_converge() {
    assert_all_resolve_to(
        "p+6Li",
        &["pLi6", "p + ⁶Li", "p + ⁶Li --> h + α", "6Li(p,h)a"],
    );
}

#[test]
fn deuteron_lithium_branch_notations_converge() {
    assert_all_resolve_to("D+6Li→4He+4He", &["6Li(d,a)a", "D+6Li→α+α"]);
    assert_all_resolve_to("D+6Li→n+7Be", &["6Li(d,n)Be", "D+6Li→n+⁷Be"]);
    assert_all_resolve_to(
        "D+6Li→p+7Li",
        &["6Li(d,p)7Li", "6Li + d --> p + 7Li", "D+6Li→p+⁷Li"],
    );
}

#[test]
fn resolution_is_idempotent_over_every_canonical_key() {
    for key in sigmafold_core::reaction::canonical_keys() {
        let resolved = resolve_reaction(key.as_str()).expect(key.as_str());
        assert_eq!(resolved, key);
    }
}

#[test]
fn branch_keys_of_one_entrance_channel_stay_distinct() {
    let dd_p = resolve_reaction("D+D→p+T").expect("tritium branch");
    let dd_n = resolve_reaction("D+D→n+3He").expect("helion branch");
    assert_ne!(dd_p, dd_n);

    let het_pn = resolve_reaction("h(t,pn)a").expect("proton-neutron branch");
    let het_d = resolve_reaction("h(t,d)a").expect("deuteron branch");
    assert_ne!(het_pn, het_d);
}

#[test]
fn unrecognized_inputs_fail_with_the_offending_string() {
    for input in ["not-a-reaction", "D+X→n+a", "p+7Li", "D+D"] {
        let error = resolve_reaction(input).expect_err(input);
        match error {
            ReactionNameError::UnresolvedReactionName { input: reported } => {
                assert_eq!(reported, input)
            }
            ReactionNameError::Species(_) => {
                assert_eq!(input, "D+X→n+a", "only the unknown-token case")
            }
        }
    }
}
