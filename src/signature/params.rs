use crate::signature::error::SignatureError;

/// How a node without a label is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissingLabel {
    /// Treat the node as carrying label `0`.
    #[default]
    Zero,
    /// Refuse the graph with [`SignatureError::MissingLabel`].
    Reject,
}

/// How each refinement round combines with the previous signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accumulation {
    /// Every round packs into a zeroed accumulator.
    #[default]
    Reset,
    /// Every round is OR-ed into the node's previous signature.
    ///
    /// Corrupts counters whenever the old and new bit patterns are not
    /// nested. Only useful for reproducing output of tools that behave
    /// this way.
    OrPrevious,
}

/// Configuration for signature generation.
///
/// ```
/// use nodesig::SignatureParams;
///
/// let params = SignatureParams::default().with_bits(4).with_width(64);
/// let layout = params.layout().unwrap();
/// assert_eq!(layout.slots(), 16);
/// assert_eq!(layout.max_count(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureParams {
    /// Width of one saturating counter.
    pub bits: u32,
    /// Width of the whole signature, at most 64.
    pub width: u32,
    /// Labels at or above this value are never counted.
    pub label_space: Option<u32>,
    /// Number of refinement rounds after the initial label round.
    pub refinement_steps: usize,
    pub missing_label: MissingLabel,
    pub accumulation: Accumulation,
}

impl Default for SignatureParams {
    fn default() -> Self {
        Self {
            bits: 2,
            width: 32,
            label_space: None,
            refinement_steps: 0,
            missing_label: MissingLabel::Zero,
            accumulation: Accumulation::Reset,
        }
    }
}

impl SignatureParams {
    /// Builds parameters from untyped integers, rejecting negative or
    /// out-of-range values.
    pub fn checked(bits: i64, width: i64, refinement_steps: i64) -> Result<Self, SignatureError> {
        let width = u32::try_from(width)
            .ok()
            .filter(|w| (1..=64).contains(w))
            .ok_or(SignatureError::InvalidWidth { width })?;
        let bits = u32::try_from(bits)
            .ok()
            .filter(|b| (1..=width).contains(b))
            .ok_or(SignatureError::InvalidBits { bits, width })?;
        let refinement_steps = usize::try_from(refinement_steps).map_err(|_| {
            SignatureError::NegativeRefinementSteps {
                steps: refinement_steps,
            }
        })?;
        Ok(Self {
            bits,
            width,
            refinement_steps,
            ..Self::default()
        })
    }

    pub fn with_bits(mut self, bits: u32) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_label_space(mut self, label_space: u32) -> Self {
        self.label_space = Some(label_space);
        self
    }

    /// Falls back to `declared` when no label space was set explicitly.
    pub fn or_label_space(mut self, declared: Option<u32>) -> Self {
        self.label_space = self.label_space.or(declared);
        self
    }

    pub fn with_refinement_steps(mut self, steps: usize) -> Self {
        self.refinement_steps = steps;
        self
    }

    pub fn with_missing_label(mut self, policy: MissingLabel) -> Self {
        self.missing_label = policy;
        self
    }

    pub fn with_accumulation(mut self, accumulation: Accumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    /// Validates the parameters and derives the slot layout.
    pub fn layout(&self) -> Result<SlotLayout, SignatureError> {
        SlotLayout::new(self.bits, self.width, self.label_space)
    }
}

/// The validated arrangement of counters inside a signature.
///
/// Slot `i` occupies bits `i * bits .. (i + 1) * bits`. A layout can only be
/// obtained through validation, so `bits` is always in `1..=width` and
/// `slots` is always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotLayout {
    bits: u32,
    width: u32,
    slots: usize,
}

impl SlotLayout {
    pub fn new(bits: u32, width: u32, label_space: Option<u32>) -> Result<Self, SignatureError> {
        if !(1..=64).contains(&width) {
            return Err(SignatureError::InvalidWidth {
                width: i64::from(width),
            });
        }
        if !(1..=width).contains(&bits) {
            return Err(SignatureError::InvalidBits {
                bits: i64::from(bits),
                width,
            });
        }
        let mut slots = (width / bits) as usize;
        if let Some(space) = label_space {
            slots = slots.min(space as usize);
        }
        if slots == 0 {
            return Err(SignatureError::NoLabelSlots);
        }
        Ok(Self { bits, width, slots })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of distinguishable labels, `maxLabels`.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Largest value a single counter can hold, `2^bits - 1`.
    pub fn max_count(&self) -> u64 {
        u64::MAX >> (64 - self.bits)
    }

    pub fn offset(&self, slot: usize) -> u32 {
        slot as u32 * self.bits
    }
}
