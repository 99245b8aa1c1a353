use quire_types::Sp;

/// Elasticity of a glue in one direction. An infinite flexibility dominates
/// every finite one in its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flexibility {
    pub amount: Sp,
    pub infinite: bool,
}

impl Flexibility {
    pub const NONE: Flexibility = Flexibility {
        amount: 0,
        infinite: false,
    };

    pub fn finite(amount: Sp) -> Flexibility {
        Flexibility {
            amount,
            infinite: false,
        }
    }

    pub fn infinite(amount: Sp) -> Flexibility {
        Flexibility {
            amount,
            infinite: true,
        }
    }
}

/// Elastic space between elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glue {
    size: Sp,
    stretch: Flexibility,
    shrink: Flexibility,
    horizontal: bool,
}

impl Glue {
    /// Glue with finite stretch and shrink.
    pub fn new(size: Sp, stretch: Sp, shrink: Sp, horizontal: bool) -> Glue {
        Glue {
            size,
            stretch: Flexibility::finite(stretch),
            shrink: Flexibility::finite(shrink),
            horizontal,
        }
    }

    pub fn with_flex(size: Sp, stretch: Flexibility, shrink: Flexibility, horizontal: bool) -> Glue {
        Glue {
            size,
            stretch,
            shrink,
            horizontal,
        }
    }

    /// Completely rigid glue; what a glue becomes once the breaker has set it.
    pub fn fixed(size: Sp, horizontal: bool) -> Glue {
        Glue::new(size, 0, 0, horizontal)
    }

    /// An infinitely stretchable glue of no natural size, for filling out the
    /// end of a paragraph or page.
    pub fn infinite(horizontal: bool) -> Glue {
        Glue::with_flex(
            0,
            Flexibility::infinite(quire_types::SpaceUnit::Pt.to_sp(1.0)),
            Flexibility::NONE,
            horizontal,
        )
    }

    pub fn size(&self) -> Sp {
        self.size
    }

    pub fn stretch(&self) -> Flexibility {
        self.stretch
    }

    pub fn shrink(&self) -> Flexibility {
        self.shrink
    }

    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }
}
