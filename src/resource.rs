use std::marker::PhantomData;

use gl::types::GLuint;

use crate::handle::Handle;

/// Per-kind strategy: how one kind of GL object is generated and
/// destroyed. Implementors are stateless unit structs, so dispatch is
/// resolved at compile time.
pub trait ResourceKind {
    /// Extra arguments the generate call needs (the shader stage for
    /// shader objects, `()` for everything else).
    type Params;

    fn generate(params: Self::Params) -> GLuint;
    fn destroy(id: GLuint);
}

/// Kinds with a single binding point.
pub trait Bind: ResourceKind {
    fn bind(id: GLuint);
}

/// Kinds with several binding points selected by a target. Unbinding
/// must restore the same target it was bound to, not a default one.
pub trait TargetedBind: ResourceKind {
    type Target: Copy;

    fn bind(target: Self::Target, id: GLuint);
}

/// Owns one GL object of kind `K`.
///
/// The owned [`Handle`] is either 0 (no resource) or names an object
/// known to exist; dropping the resource deletes a non-zero name exactly
/// once. Binding hands out a guard that rebinds 0 when it goes out of
/// scope, so a binding can never outlive the block that established it.
///
/// ```no_run
/// use glid::kind::Buffer;
/// use glid::Resource;
///
/// let mut vbo = Resource::<Buffer>::new();
/// vbo.make(());
/// {
///     let _bound = vbo.bind();
///     // upload while bound
/// } // binding point reverts to 0 here
/// ```
#[derive(Debug)]
pub struct Resource<K: ResourceKind> {
    handle: Handle,
    _kind: PhantomData<K>,
}

impl<K: ResourceKind> Resource<K> {
    /// An empty resource; nothing is generated until [`make`](Self::make).
    pub fn new() -> Resource<K> {
        Resource {
            handle: Handle::default(),
            _kind: PhantomData,
        }
    }

    /// Adopts an externally created name without generating.
    pub fn from_raw(id: GLuint) -> Resource<K> {
        Resource {
            handle: Handle::new(id),
            _kind: PhantomData,
        }
    }

    /// Generates the underlying object if the resource is empty; a no-op
    /// otherwise. Chainable.
    pub fn make(&mut self, params: K::Params) -> &mut Self {
        if self.handle.is_null() {
            self.handle = Handle::new(K::generate(params));
        }
        self
    }

    /// Destroys any existing object, then generates a fresh one. Use when
    /// parameters affecting creation have changed and the old object must
    /// not survive.
    pub fn remake(&mut self, params: K::Params) -> &mut Self {
        self.destroy_current();
        self.handle = Handle::new(K::generate(params));
        self
    }

    /// Destroys any existing object, then adopts `id` without generating.
    pub fn reset(&mut self, id: GLuint) {
        self.destroy_current();
        self.handle = Handle::new(id);
    }

    /// The raw name, 0 if empty.
    pub fn get(&self) -> GLuint {
        self.handle.get()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_null()
    }

    /// Hands the raw name to the caller; the destructor will no longer
    /// delete it.
    pub fn release(&mut self) -> GLuint {
        self.handle.release()
    }

    fn destroy_current(&mut self) {
        // the slot is zeroed before the destroy call runs, so no path can
        // see (or re-destroy) a stale name
        let id = self.handle.release();
        if id != 0 {
            K::destroy(id);
        }
    }
}

impl<K: ResourceKind> Default for Resource<K> {
    fn default() -> Resource<K> {
        Resource::new()
    }
}

impl<K: Bind> Resource<K> {
    /// Binds the resource and returns a guard. While the guard lives the
    /// resource is the active binding; when it drops, the binding point
    /// reverts to 0.
    pub fn bind(&self) -> Binding<'_, K> {
        debug_assert!(!self.handle.is_null(), "binding an empty resource");
        K::bind(self.handle.get());
        Binding {
            _resource: PhantomData,
        }
    }
}

impl<K: TargetedBind> Resource<K> {
    /// Binds the resource at `target`. The guard remembers the target and
    /// unbinds that same target when it drops.
    pub fn bind_to(&self, target: K::Target) -> TargetBinding<'_, K> {
        debug_assert!(!self.handle.is_null(), "binding an empty resource");
        K::bind(target, self.handle.get());
        TargetBinding {
            target,
            _resource: PhantomData,
        }
    }
}

impl<K: ResourceKind> Drop for Resource<K> {
    fn drop(&mut self) {
        self.destroy_current();
    }
}

/// Marks a [`Resource`] as currently bound. Only `Resource::bind` can
/// construct one. Dropping it rebinds name 0, whichever way the scope
/// exits (including a panic unwind), and that unbind goes through the
/// checked call path like any other, so teardown may still report an API
/// error.
///
/// Nested guards for the same binding point unbind in reverse order of
/// binding; drop order enforces this for guards left in their lexical
/// scope.
#[must_use = "dropping the guard immediately unbinds again"]
pub struct Binding<'a, K: Bind> {
    _resource: PhantomData<&'a Resource<K>>,
}

impl<'a, K: Bind> Drop for Binding<'a, K> {
    fn drop(&mut self) {
        K::bind(0);
    }
}

/// [`Binding`], for kinds whose binding point is selected by a target.
#[must_use = "dropping the guard immediately unbinds again"]
pub struct TargetBinding<'a, K: TargetedBind> {
    target: K::Target,
    _resource: PhantomData<&'a Resource<K>>,
}

impl<'a, K: TargetedBind> TargetBinding<'a, K> {
    /// The target captured at bind time.
    pub fn target(&self) -> K::Target {
        self.target
    }
}

impl<'a, K: TargetedBind> Drop for TargetBinding<'a, K> {
    fn drop(&mut self) {
        K::bind(self.target, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::panic::{self, AssertUnwindSafe};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Point {
        Read,
        Draw,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Generate(GLuint),
        Destroy(GLuint),
        Bind(GLuint),
        BindTo(Point, GLuint),
    }

    // every #[test] runs on its own thread, so each one sees a fresh log
    thread_local! {
        static CALLS: RefCell<Vec<Call>> = RefCell::new(Vec::new());
        static NEXT_ID: Cell<GLuint> = Cell::new(0);
    }

    fn record(call: Call) {
        CALLS.with(|calls| calls.borrow_mut().push(call));
    }

    fn calls() -> Vec<Call> {
        CALLS.with(|calls| calls.borrow().clone())
    }

    fn next_id() -> GLuint {
        NEXT_ID.with(|next| {
            next.set(next.get() + 1);
            next.get()
        })
    }

    struct Fake;

    impl ResourceKind for Fake {
        type Params = ();

        fn generate(_params: ()) -> GLuint {
            let id = next_id();
            record(Call::Generate(id));
            id
        }

        fn destroy(id: GLuint) {
            record(Call::Destroy(id));
        }
    }

    impl Bind for Fake {
        fn bind(id: GLuint) {
            record(Call::Bind(id));
        }
    }

    struct FakeTargeted;

    impl ResourceKind for FakeTargeted {
        type Params = ();

        fn generate(_params: ()) -> GLuint {
            let id = next_id();
            record(Call::Generate(id));
            id
        }

        fn destroy(id: GLuint) {
            record(Call::Destroy(id));
        }
    }

    impl TargetedBind for FakeTargeted {
        type Target = Point;

        fn bind(target: Point, id: GLuint) {
            record(Call::BindTo(target, id));
        }
    }

    #[test]
    fn make_generates_once_and_is_then_a_noop() {
        let mut resource = Resource::<Fake>::new();
        assert!(resource.is_empty());

        resource.make(());
        let id = resource.get();
        assert_ne!(id, 0);

        resource.make(());
        resource.make(());
        assert_eq!(resource.get(), id);
        assert_eq!(calls(), vec![Call::Generate(id)]);
    }

    #[test]
    fn remake_destroys_the_old_object_first() {
        let mut resource = Resource::<Fake>::new();
        resource.make(());
        let first = resource.get();

        resource.remake(());
        let second = resource.get();
        assert_ne!(second, first);
        assert_eq!(
            calls(),
            vec![
                Call::Generate(first),
                Call::Destroy(first),
                Call::Generate(second),
            ]
        );
    }

    #[test]
    fn remake_twice_never_destroys_a_dead_name() {
        let mut resource = Resource::<Fake>::new();
        resource.make(());
        resource.remake(());
        resource.remake(());

        assert_eq!(
            calls(),
            vec![
                Call::Generate(1),
                Call::Destroy(1),
                Call::Generate(2),
                Call::Destroy(2),
                Call::Generate(3),
            ]
        );
    }

    #[test]
    fn reset_adopts_without_generating() {
        let mut resource = Resource::<Fake>::new();
        resource.make(());
        let generated = resource.get();

        resource.reset(40);
        assert_eq!(resource.get(), 40);
        assert_eq!(
            calls(),
            vec![Call::Generate(generated), Call::Destroy(generated)]
        );

        drop(resource);
        assert_eq!(calls().last(), Some(&Call::Destroy(40)));
    }

    #[test]
    fn reset_on_an_empty_resource_is_plain_adoption() {
        let mut resource = Resource::<Fake>::new();
        resource.reset(9);
        assert!(calls().is_empty());

        drop(resource);
        assert_eq!(calls(), vec![Call::Destroy(9)]);
    }

    #[test]
    fn dropping_an_empty_resource_destroys_nothing() {
        drop(Resource::<Fake>::new());
        assert!(calls().is_empty());
    }

    #[test]
    fn release_disarms_the_destructor() {
        let mut resource = Resource::<Fake>::new();
        resource.make(());
        let id = resource.get();

        assert_eq!(resource.release(), id);
        assert!(resource.is_empty());
        drop(resource);
        assert_eq!(calls(), vec![Call::Generate(id)]);
    }

    #[test]
    fn from_raw_adopts_and_later_destroys() {
        let resource = Resource::<Fake>::from_raw(17);
        assert_eq!(resource.get(), 17);
        drop(resource);
        assert_eq!(calls(), vec![Call::Destroy(17)]);
    }

    // every generate is eventually paired with exactly one destroy, with
    // at most one unreleased object outstanding at any point
    #[test]
    fn generates_and_destroys_stay_paired_across_a_whole_lifetime() {
        let mut resource = Resource::<Fake>::new();
        resource.make(());
        resource.remake(());
        resource.reset(100);
        resource.remake(());
        resource.make(());
        drop(resource);

        let log = calls();
        let generates = log
            .iter()
            .filter(|call| matches!(call, Call::Generate(_)))
            .count();
        let destroys: Vec<GLuint> = log
            .iter()
            .filter_map(|call| match call {
                Call::Destroy(id) => Some(*id),
                _ => None,
            })
            .collect();

        // the adopted name 100 accounts for one extra destroy
        assert_eq!(generates + 1, destroys.len());
        assert!(!destroys.contains(&0));
        let mut deduped = destroys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), destroys.len());
    }

    #[test]
    fn binding_guard_unbinds_exactly_once_on_drop() {
        let mut resource = Resource::<Fake>::new();
        resource.make(());
        let id = resource.get();

        {
            let _bound = resource.bind();
        }

        assert_eq!(
            calls(),
            vec![Call::Generate(id), Call::Bind(id), Call::Bind(0)]
        );
    }

    #[test]
    fn binding_guard_unbinds_during_a_panic_unwind() {
        let mut resource = Resource::<Fake>::new();
        resource.make(());
        let id = resource.get();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _bound = resource.bind();
            panic!("failure mid-scope");
        }));
        assert!(result.is_err());

        assert_eq!(
            calls(),
            vec![Call::Generate(id), Call::Bind(id), Call::Bind(0)]
        );
    }

    #[test]
    fn nested_bindings_unbind_in_reverse_order() {
        let mut outer = Resource::<Fake>::new();
        let mut inner = Resource::<Fake>::new();
        outer.make(());
        inner.make(());
        let (a, b) = (outer.get(), inner.get());

        let bound_outer = outer.bind();
        let bound_inner = inner.bind();
        drop(bound_inner);
        drop(bound_outer);

        assert_eq!(
            calls(),
            vec![
                Call::Generate(a),
                Call::Generate(b),
                Call::Bind(a),
                Call::Bind(b),
                Call::Bind(0),
                Call::Bind(0),
            ]
        );
    }

    #[test]
    fn targeted_guard_restores_the_target_it_bound() {
        let mut framebuffer = Resource::<FakeTargeted>::new();
        framebuffer.make(());
        let id = framebuffer.get();

        {
            let _draw = framebuffer.bind_to(Point::Draw);
            {
                let _read = framebuffer.bind_to(Point::Read);
            }
        }

        assert_eq!(
            calls(),
            vec![
                Call::Generate(id),
                Call::BindTo(Point::Draw, id),
                Call::BindTo(Point::Read, id),
                Call::BindTo(Point::Read, 0),
                Call::BindTo(Point::Draw, 0),
            ]
        );
    }

    #[test]
    fn targeted_guard_reports_its_target() {
        let mut framebuffer = Resource::<FakeTargeted>::new();
        framebuffer.make(());

        let bound = framebuffer.bind_to(Point::Read);
        assert_eq!(bound.target(), Point::Read);
    }

    // the full journey of a buffer-shaped resource, end to end
    #[test]
    fn whole_lifecycle_of_a_single_resource() {
        let mut resource = Resource::<Fake>::new();
        resource.make(());
        let id = resource.get();
        assert_ne!(id, 0);

        {
            let _bound = resource.bind();
        }
        drop(resource);

        assert_eq!(
            calls(),
            vec![
                Call::Generate(id),
                Call::Bind(id),
                Call::Bind(0),
                Call::Destroy(id),
            ]
        );
    }
}
