use std::collections::HashSet;

use blake3::hash;
use rbseq::monoid::Concat;
use rbseq::{CopyPolicy, Ephemeral, Persistent, RedBlackTree, TreeConfig};

fn run_script<P: CopyPolicy>() -> String {
    let mut tree = RedBlackTree::<Concat, P>::with_config(TreeConfig { capacity: 1 << 14 });
    let values: Vec<String> = (0..40).map(|i| format!("{i:02}")).collect();
    let mut root = tree.build(&values).expect("build succeeds");

    let mut transcript = String::new();
    for step in 0..120usize {
        let len = tree.len(root).expect("len");
        match step % 5 {
            0 => tree.insert(&mut root, step % (len + 1), format!("i{step}")).expect("insert"),
            1 if len > 0 => {
                let removed = tree.erase(&mut root, (step * 3) % len).expect("erase");
                transcript.push_str(&removed);
            }
            2 if len > 0 => tree.set(&mut root, step % len, format!("s{step}")).expect("set"),
            3 => {
                let (front, back) = tree.split(root, step % (len + 1)).expect("split");
                root = tree.merge(back, front).expect("merge");
            }
            _ => {
                let end = tree.len(root).expect("len");
                transcript.push_str(&tree.range_reduce(root, end / 3, end).expect("reduce"));
            }
        }
        transcript.push('|');
    }
    transcript.push_str(&tree.render(root, Clone::clone).expect("render"));
    transcript
}

#[test]
fn sequence_engine_is_deterministic() {
    let mut fingerprints = HashSet::new();
    for _ in 0..3 {
        fingerprints.insert(hash(run_script::<Ephemeral>().as_bytes()));
        fingerprints.insert(hash(run_script::<Persistent>().as_bytes()));
    }

    assert_eq!(fingerprints.len(), 1, "outputs diverged across runs or policies");
}
