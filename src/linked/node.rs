use std::ptr::NonNull;

/// Heap node of the linked ring. A vacated node keeps its slot in the cycle
/// with `elem == None` until a later push reuses it.
pub(crate) struct Node<T> {
    pub(crate) elem: Option<T>,
    pub(crate) next: NonNull<Node<T>>,
}

impl<T> Node<T> {
    /// Allocates a node linked to itself.
    pub fn alloc(elem: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            elem: Some(elem),
            next: NonNull::dangling(),
        });

        let mut ptr = NonNull::from(Box::leak(node));
        unsafe {
            ptr.as_mut().next = ptr;
        }

        ptr
    }

    /// Allocates a node and splices it in directly after `prev`.
    ///
    /// # Safety
    ///
    /// `prev` must point to a live node owned by the same ring.
    pub unsafe fn alloc_after(mut prev: NonNull<Node<T>>, elem: T) -> NonNull<Node<T>> {
        let mut node = Self::alloc(elem);

        node.as_mut().next = prev.as_ref().next;
        prev.as_mut().next = node;

        node
    }

    /// Frees a node previously returned by [`Node::alloc`].
    ///
    /// # Safety
    ///
    /// `ptr` must not be used again after this call.
    pub unsafe fn free(ptr: NonNull<Node<T>>) {
        drop(Box::from_raw(ptr.as_ptr()));
    }
}
