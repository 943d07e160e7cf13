use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use felt_merkle::{FieldElement, MerkleTree, Sha256Hasher, verify_decommitment};
use rand::Rng;

fn prepare_leaves(count: usize) -> Vec<FieldElement> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| FieldElement::from(rng.random::<u64>()))
        .collect()
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("Merkle build");
        let inputs = [1_000usize, 10_000, 100_000];
        for input in inputs.iter() {
            let leaves = prepare_leaves(*input);
            group.bench_with_input(BenchmarkId::new("leaves", input), &leaves, |b, leaves| {
                b.iter(|| MerkleTree::<FieldElement>::new(leaves.clone()).expect("build"));
            });
        }
    }

    c.bench_function("Merkle authentication path", |b| {
        let tree = MerkleTree::<FieldElement>::new(prepare_leaves(100_000)).expect("build");
        let mut rng = rand::rng();
        b.iter(|| {
            let leaf_id = rng.random_range(0..tree.leaf_count());
            tree.authentication_path(leaf_id).expect("leaf in range")
        });
    });

    c.bench_function("Merkle verify", |b| {
        let tree = MerkleTree::<FieldElement>::new(prepare_leaves(100_000)).expect("build");
        let mut rng = rand::rng();
        let proofs: Vec<_> = (0..1_000)
            .map(|_| {
                let leaf_id = rng.random_range(0..tree.leaf_count());
                let path = tree.authentication_path(leaf_id).expect("leaf in range");
                (leaf_id, tree.leaves()[leaf_id], path)
            })
            .collect();
        let mut index = 0;
        b.iter(|| {
            let (leaf_id, leaf, path) = &proofs[index % proofs.len()];
            index += 1;
            assert!(
                verify_decommitment::<Sha256Hasher, _>(*leaf_id, leaf, path, tree.root())
                    .expect("verify")
            );
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench
);
criterion_main!(benches);
