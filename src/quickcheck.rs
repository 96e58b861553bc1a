use compare::Compare;
use ::quickcheck::{Arbitrary, Gen};
use super::balance::Balance;
use super::BiMap;

/// Generates maps from arbitrary pair lists; pairs that collide with an earlier pair on either side
/// are dropped.
impl<L, R, CL, CR, B> Arbitrary for BiMap<L, R, CL, CR, B>
    where L: Arbitrary, R: Arbitrary, CL: 'static + Clone + Compare<L> + Default,
          CR: 'static + Clone + Compare<R> + Default, B: Balance {

    fn arbitrary(gen: &mut Gen) -> Self {
        Vec::<(L, R)>::arbitrary(gen).into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> {
        let vec: Vec<(L, R)> = self.clone().into_iter().collect();
        Box::new(vec.shrink().map(|vec| vec.into_iter().collect()))
    }
}
