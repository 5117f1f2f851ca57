//! Builder plumbing shared by every request type.

/// One `with_<field>` setter.
///
/// - `flag`: plain `bool`
/// - `opt`: `Option<T>` filled from anything `Into<T>`
/// - `val`: `Option<T>` filled from a `T`
/// - `vec`: `Vec<T>` filled from any iterator
macro_rules! setter {
    ($($target:ident)?; flag $field:ident) => {
        ::paste::paste! {
            pub fn [<with_ $field>](mut self, value: bool) -> Self {
                self$(.$target)?.$field = value;
                self
            }
        }
    };
    ($($target:ident)?; opt $field:ident : $ty:ty) => {
        ::paste::paste! {
            pub fn [<with_ $field>](mut self, value: impl Into<$ty>) -> Self {
                self$(.$target)?.$field = Some(value.into());
                self
            }
        }
    };
    ($($target:ident)?; val $field:ident : $ty:ty) => {
        ::paste::paste! {
            pub fn [<with_ $field>](mut self, value: $ty) -> Self {
                self$(.$target)?.$field = Some(value);
                self
            }
        }
    };
    ($($target:ident)?; vec $field:ident : $ty:ty) => {
        ::paste::paste! {
            pub fn [<with_ $field>](mut self, values: impl IntoIterator<Item = $ty>) -> Self {
                self$(.$target)?.$field = values.into_iter().collect();
                self
            }
        }
    };
}

/// Setters on a plain sub-structure (`Set`, `Unset`, column definitions...).
macro_rules! setters {
    ($ty:ident { $($kind:ident $field:ident $(: $fty:ty)?),* $(,)? }) => {
        impl $ty {
            $( setter!(; $kind $field $(: $fty)?); )*
        }
    };
}

/// A caller-facing request wrapping one options value.
///
/// Required fields go through a hand-written `new`; everything else gets a
/// generated setter. `to_options` is a pure projection.
macro_rules! request {
    (
        $(#[$meta:meta])*
        $request:ident => $options:ident { $($kind:ident $field:ident $(: $fty:ty)?),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $request {
            options: $options,
        }

        impl $request {
            $( setter!(options; $kind $field $(: $fty)?); )*

            pub fn to_options(&self) -> $options {
                self.options.clone()
            }
        }

        impl From<$request> for $options {
            fn from(request: $request) -> Self {
                request.options
            }
        }
    };
}

/// A per-kind entry point borrowed from the [`Client`](crate::Client).
macro_rules! gateway {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            client: &'a $crate::client::Client,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(client: &'a $crate::client::Client) -> Self {
                Self { client }
            }
        }
    };
}

/// `DROP <KIND> [IF EXISTS] <name>` options and request.
macro_rules! drop_object {
    ($options:ident, $request:ident, $keyword:literal, $id:ty) => {
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $options {
            pub if_exists: bool,
            pub name: $id,
        }

        impl $crate::validation::Validate for $options {
            fn validate(&self) -> $crate::error::Result<()> {
                let mut errors = $crate::validation::Errors::new(stringify!($options));
                errors.identifier("name", &self.name);
                errors.finish()
            }
        }

        impl $crate::render::RenderSql for $options {
            fn render(&self, sql: &mut $crate::render::SqlBuilder) {
                sql.keyword(concat!("DROP ", $keyword))
                    .flag(self.if_exists, "IF EXISTS")
                    .identifier(&self.name);
            }
        }

        request! {
            $request => $options { flag if_exists }
        }

        impl $request {
            pub fn new(name: $id) -> Self {
                Self {
                    options: $options {
                        name,
                        ..Default::default()
                    },
                }
            }
        }
    };
}

/// `<VERB> <KIND> <name>` options for statements that only take the target:
/// `DESCRIBE`, `UNDROP`, `USE`.
macro_rules! target_only {
    ($options:ident, $statement:literal, $id:ty) => {
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $options {
            pub name: $id,
        }

        impl $options {
            pub fn new(name: $id) -> Self {
                Self { name }
            }
        }

        impl $crate::validation::Validate for $options {
            fn validate(&self) -> $crate::error::Result<()> {
                let mut errors = $crate::validation::Errors::new(stringify!($options));
                errors.identifier("name", &self.name);
                errors.finish()
            }
        }

        impl $crate::render::RenderSql for $options {
            fn render(&self, sql: &mut $crate::render::SqlBuilder) {
                sql.keyword($statement).identifier(&self.name);
            }
        }
    };
}

macro_rules! show_field_type {
    (flag) => { bool };
    (opt $ty:ty) => { Option<$ty> };
    (val $ty:ty) => { Option<$ty> };
}

macro_rules! show_render {
    (@pre $sql:ident, $this:ident, terse) => {
        $sql.flag($this.terse, "TERSE");
    };
    (@pre $sql:ident, $this:ident, $other:ident) => {};
    (@post $sql:ident, $this:ident, terse) => {};
    (@post $sql:ident, $this:ident, history) => {
        $sql.flag($this.history, "HISTORY");
    };
    (@post $sql:ident, $this:ident, like) => {
        $sql.nested($this.like.as_ref());
    };
    (@post $sql:ident, $this:ident, in_scope) => {
        $sql.nested($this.in_scope.as_ref());
    };
    (@post $sql:ident, $this:ident, starts_with) => {
        $sql.keyword_value(
            "STARTS WITH",
            $this.starts_with.as_ref(),
            $crate::render::Quote::Single,
        );
    };
    (@post $sql:ident, $this:ident, root_only) => {
        $sql.flag($this.root_only, "ROOT ONLY");
    };
    (@post $sql:ident, $this:ident, limit) => {
        $sql.nested($this.limit.as_ref());
    };
}

macro_rules! show_check {
    ($errors:ident, $this:ident, flag $field:ident) => {};
    ($errors:ident, $this:ident, $kind:ident $field:ident) => {
        if let Some(filter) = &$this.$field {
            $crate::common::ShowFilter::check(filter, &mut $errors);
        }
    };
}

/// `SHOW [TERSE] <KINDS> [HISTORY] [LIKE] [IN] [STARTS WITH] [ROOT ONLY] [LIMIT]`
/// options and request. Filters render in the order they are declared.
macro_rules! show_objects {
    (
        $options:ident, $request:ident, $keyword:literal
        { $($kind:ident $field:ident $(: $fty:ty)?),* $(,)? }
    ) => {
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $options {
            $( pub $field: show_field_type!($kind $($fty)?), )*
        }

        impl $crate::validation::Validate for $options {
            fn validate(&self) -> $crate::error::Result<()> {
                #[allow(unused_mut)]
                let mut errors = $crate::validation::Errors::new(stringify!($options));
                $( show_check!(errors, self, $kind $field); )*
                errors.finish()
            }
        }

        impl $crate::render::RenderSql for $options {
            fn render(&self, sql: &mut $crate::render::SqlBuilder) {
                sql.keyword("SHOW");
                $( show_render!(@pre sql, self, $field); )*
                sql.keyword($keyword);
                $( show_render!(@post sql, self, $field); )*
            }
        }

        request! {
            $request => $options { $($kind $field $(: $fty)?),* }
        }

        impl $request {
            pub fn new() -> Self {
                Self {
                    options: $options::default(),
                }
            }
        }

        impl Default for $request {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
