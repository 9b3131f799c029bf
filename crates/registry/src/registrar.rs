use docindex_protocol::Fragment;

/// Late-bound consumer of fragments.
///
/// `accept` is called once per fragment, while the owning
/// [`FragmentRegistry`](crate::FragmentRegistry) holds its delivery lock.
/// Implementations must not submit to or attach to that same registry from
/// inside `accept`.
pub trait Registrar<R>: Send + Sync {
    fn accept(&self, fragment: Fragment<R>);
}

impl<R, F> Registrar<R> for F
where
    F: Fn(Fragment<R>) + Send + Sync,
{
    fn accept(&self, fragment: Fragment<R>) {
        self(fragment);
    }
}
