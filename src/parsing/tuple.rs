//! Flat sequence results
//!
//! `a.and(b).and(c)` produces `(A, B, C)` rather than `((A, B), C)`. Each parser taking part in a
//! sequence hands over its items as a tuple (see `Sequence` in the combinators): one item for
//! ordinary parsers, none for ignored ones, and all of them for a nested sequence. [`Concat`]
//! joins the two sides one item at a time through [`Append`]. Results grow up to twelve
//! elements.

/// Result of a parser whose lexem is dropped from a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ignored;

/// Append one item to a tuple
pub trait Append<T> {
    type Output;

    fn append(self, item: T) -> Self::Output;
}

macro_rules! impl_append {
    ($($name:ident),*) => {
        impl<$($name,)* T> Append<T> for ($($name,)*) {
            type Output = ($($name,)* T,);

            #[allow(non_snake_case, clippy::unused_unit)]
            fn append(self, item: T) -> Self::Output {
                let ($($name,)*) = self;
                ($($name,)* item,)
            }
        }
    };
}

impl_append!();
impl_append!(A);
impl_append!(A, B);
impl_append!(A, B, C);
impl_append!(A, B, C, D);
impl_append!(A, B, C, D, E);
impl_append!(A, B, C, D, E, F);
impl_append!(A, B, C, D, E, F, G);
impl_append!(A, B, C, D, E, F, G, H);
impl_append!(A, B, C, D, E, F, G, H, I);
impl_append!(A, B, C, D, E, F, G, H, I, J);
impl_append!(A, B, C, D, E, F, G, H, I, J, L);

/// Append every item of the tuple `T`, in order
pub trait Concat<T> {
    type Output;

    fn concat(self, items: T) -> Self::Output;
}

impl<H> Concat<()> for H {
    type Output = H;

    fn concat(self, _: ()) -> Self::Output {
        self
    }
}

macro_rules! impl_concat {
    ($first:ident $(, $rest:ident)*) => {
        impl<H, $first, $($rest,)*> Concat<($first, $($rest,)*)> for H
        where
            H: Append<$first>,
            <H as Append<$first>>::Output: Concat<($($rest,)*)>,
        {
            type Output = <<H as Append<$first>>::Output as Concat<($($rest,)*)>>::Output;

            #[allow(non_snake_case)]
            fn concat(self, items: ($first, $($rest,)*)) -> Self::Output {
                let ($first, $($rest,)*) = items;
                self.append($first).concat(($($rest,)*))
            }
        }
    };
}

impl_concat!(B1);
impl_concat!(B1, B2);
impl_concat!(B1, B2, B3);
impl_concat!(B1, B2, B3, B4);
impl_concat!(B1, B2, B3, B4, B5);
impl_concat!(B1, B2, B3, B4, B5, B6);
impl_concat!(B1, B2, B3, B4, B5, B6, B7);
impl_concat!(B1, B2, B3, B4, B5, B6, B7, B8);
impl_concat!(B1, B2, B3, B4, B5, B6, B7, B8, B9);
impl_concat!(B1, B2, B3, B4, B5, B6, B7, B8, B9, B10);
impl_concat!(B1, B2, B3, B4, B5, B6, B7, B8, B9, B10, B11);
impl_concat!(B1, B2, B3, B4, B5, B6, B7, B8, B9, B10, B11, B12);
