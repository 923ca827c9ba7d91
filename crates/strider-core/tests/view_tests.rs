use ndarray::ArrayView4;
use proptest::prelude::*;
use strider::prelude::*;
use strider::InvariantError;
use test_strategy::proptest;

const D0: usize = 10;
const D1: usize = 10;
const D2: usize = 10;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn iota(n: usize) -> Vec<i32> {
    (0..n as i32).collect()
}

fn flat(m: usize, n: usize, o: usize) -> usize {
    m * D1 * D2 + n * D2 + o
}

#[test]
fn row_major_addressing() {
    let v = iota(D0 * D1 * D2);
    let r = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    for m in 0..D0 {
        for n in 0..D1 {
            for o in 0..D2 {
                let got = unsafe { *r.at(m as isize).at(n as isize).get(o as isize) };
                assert_eq!(got, v[flat(m, n, o)]);
            }
        }
    }
}

#[test]
fn offset_arithmetic() {
    let v = iota(D0 * D1 * D2);
    let r = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    let r2 = r + Dim::<2>(1) + Dim::<1>(-4) - Dim::<0>(2);
    for m in 0..D0 as isize {
        for n in 0..D1 as isize {
            for o in 0..D2 as isize {
                let got = unsafe { *r2.at(m - 1).at(n + 4).get(o + 2) };
                assert_eq!(got, v[flat(m as usize, n as usize, o as usize)]);
            }
        }
    }
}

#[test]
fn offsets_commute_and_accumulate() {
    let v = iota(D0 * D1 * D2);
    let r = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    assert_eq!(r + Dim::<0>(3) + Dim::<2>(2), r + Dim::<2>(2) + Dim::<0>(3));
    assert_eq!(r + Dim::<1>(2) + Dim::<1>(5), r + Dim::<1>(7));
    assert_eq!(r + Dim::<1>(2) - Dim::<1>(2), r);
}

#[test]
fn transpose_swaps_outer_axes() {
    let v = iota(D0 * D1 * D2);
    let r = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    let tr = r.transpose([1, 0, 2]);
    for m in 0..D0 as isize {
        for n in 0..D1 as isize {
            for o in 0..D2 as isize {
                unsafe {
                    assert_eq!(*tr.at(n).at(o).get(m), *r.at(m).at(n).get(o));
                }
            }
        }
    }
}

#[test]
fn transpose_of_subview() {
    let v = iota(D0 * D1 * D2);
    let r = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    let sub = r.at(5).transpose([0, 1]);
    for m in 0..D1 {
        for n in 0..D2 {
            let got = unsafe { *sub.at(n as isize).get(m as isize) };
            assert_eq!(got, v[flat(5, m, n)]);
        }
    }
}

#[test]
fn rank_reduction_types() {
    let v = iota(D0 * D1 * D2);
    let r: ViewRef<'_, i32, 3> = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    let plane: ViewRef<'_, i32, 2> = r.at(1);
    let row: ViewRef<'_, i32, 1> = plane.at(2);
    let elem: &i32 = unsafe { row.get(3) };
    assert_eq!(*elem, 123);
    assert_eq!((r.rank(), plane.rank(), row.rank()), (3, 2, 1));
}

#[test]
fn read_only_conversion() {
    let mut v = iota(D0 * D1 * D2);
    let r = ViewMut::from_slice_mut(&mut v, strides![D1 * D2, D2, 1]);
    let ro: ViewRef<'_, i32, 3> = r.into();
    let row = ro.transpose([0, 2, 1]).at(4).at(3);
    assert_eq!(unsafe { *row.get(2) }, 324);
}

#[test]
fn rebind_keeps_destination_strides() {
    let v = iota(D0 * D1 * D2);
    let mut a = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    let b = a.transpose([1, 0, 2]) + Dim::<0>(2);
    assert_ne!(a.strides(), b.strides());

    a.rebind(&b);
    assert_eq!(a.strides(), &strides![D1 * D2, D2, 1]);
    assert_eq!(a.as_ptr(), b.as_ptr());
    for m in 0..D0 - 2 {
        for n in 0..D1 {
            for o in 0..D2 {
                let got = unsafe { *a.at(m as isize).at(n as isize).get(o as isize) };
                assert_eq!(got, v[flat(m + 2, n, o)]);
            }
        }
    }
}

#[test]
fn mutation_through_derived_view() {
    let mut v = iota(D0 * D1 * D2);
    {
        let r = ViewMut::from_slice_mut(&mut v, strides![D1 * D2, D2, 1]);
        let r2 = r + Dim::<2>(1) + Dim::<1>(-4) - Dim::<0>(2);
        unsafe { *r2.at(4).at(5).get_mut(6) = -1 };
        assert_eq!(unsafe { *r.at(5).at(1).get(4) }, -1);
    }
    assert_eq!(v[flat(5, 1, 4)], -1);
}

#[test]
fn try_transpose_reports_bad_permutation() {
    init_logger();
    let v = iota(8);
    let r = ViewRef::from_slice(&v, strides![4, 2, 1]);
    assert_eq!(
        r.try_transpose([2, 2, 0]).unwrap_err(),
        InvariantError::DuplicateDims
    );
    assert_eq!(r.try_transpose([1, 0, 2]).unwrap(), r.transpose([1, 0, 2]));
}

#[test]
fn shared_views_across_threads() {
    let v = iota(D0 * D1 * D2);
    let r = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    let sums: Vec<i64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..D0 as isize)
            .map(|m| {
                s.spawn(move || {
                    let plane = r.at(m);
                    let mut sum = 0i64;
                    for n in 0..D1 as isize {
                        for o in 0..D2 as isize {
                            sum += unsafe { *plane.at(n).get(o) } as i64;
                        }
                    }
                    sum
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    let expected: i64 = v.iter().map(|&x| x as i64).sum();
    assert_eq!(sums.iter().sum::<i64>(), expected);
}

#[derive(Debug, Clone)]
struct TransposeProblem {
    dims: [usize; 4],
    perm: [usize; 4],
}

impl Arbitrary for TransposeProblem {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: ()) -> Self::Strategy {
        (
            prop::array::uniform4(1usize..=5),
            Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
        )
            .prop_map(|(dims, perm)| TransposeProblem {
                dims,
                perm: [perm[0], perm[1], perm[2], perm[3]],
            })
            .boxed()
    }
}

fn run_transpose_trial(prob: TransposeProblem) -> anyhow::Result<()> {
    let TransposeProblem { dims, perm } = prob;
    let v = iota(dims.iter().product());
    let view = ViewRef::from_slice(&v, Strides::row_major(dims));
    let ours = view.transpose(perm);

    // ndarray numbers axes from the outermost one.
    let ground = ArrayView4::from_shape((dims[0], dims[1], dims[2], dims[3]), v.as_slice())?
        .permuted_axes(perm.map(|p| 3 - p));
    for ((i, j, k, l), expected) in ground.indexed_iter() {
        let (i, j, k, l) = (i as isize, j as isize, k as isize, l as isize);
        let got = unsafe { *ours.at(i).at(j).at(k).get(l) };
        anyhow::ensure!(
            got == *expected,
            "{:?} at ({}, {}, {}, {}): {} != {}",
            perm,
            i,
            j,
            k,
            l,
            got,
            expected
        );
    }

    let inverse = Strides::<4>::inverse_permutation(perm);
    anyhow::ensure!(ours.transpose(inverse) == view, "{:?} is not undone", perm);
    Ok(())
}

#[proptest(cases = 32)]
fn test_transpose(prob: TransposeProblem) {
    run_transpose_trial(prob).unwrap();
}

#[proptest(cases = 64)]
fn test_shift_matches_tokens(
    #[strategy(-8isize..8)] a: isize,
    #[strategy(-8isize..8)] b: isize,
    #[strategy(-8isize..8)] c: isize,
) {
    let v = iota(D0 * D1 * D2);
    let r = ViewRef::from_slice(&v, strides![D1 * D2, D2, 1]);
    let by_tokens = r + Dim::<2>(a) + Dim::<1>(b) + Dim::<0>(c);
    let by_shift = r.shift(0, a).shift(1, b).shift(2, c);
    prop_assert_eq!(by_tokens, by_shift);
}
