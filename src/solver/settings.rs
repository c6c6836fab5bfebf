use super::SettingsError;
use derive_builder::Builder;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Value of a backend specific option, i.e. one of the keyword
/// arguments forwarded untouched to the selected solver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            OptionValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// integer value.   Non-negative integral floats are accepted too.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            OptionValue::Int(v) => u32::try_from(v).ok(),
            OptionValue::Float(v) if v.fract() == 0. && v >= 0. && v <= u32::MAX as f64 => {
                Some(v as u32)
            }
            _ => None,
        }
    }

    /// float value.   Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            OptionValue::Float(v) => Some(v),
            OptionValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{}", if *v { "on" } else { "off" }),
            OptionValue::Int(v) => write!(f, "{}", v),
            OptionValue::Float(v) => write!(f, "{}", v),
            OptionValue::Str(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from_for_option_value {
    ($ty:ty, $variant:ident, $conv:expr) => {
        impl From<$ty> for OptionValue {
            fn from(v: $ty) -> Self {
                OptionValue::$variant($conv(v))
            }
        }
    };
}
impl_from_for_option_value!(bool, Bool, |v| v);
impl_from_for_option_value!(i32, Int, i64::from);
impl_from_for_option_value!(i64, Int, |v| v);
impl_from_for_option_value!(u32, Int, i64::from);
impl_from_for_option_value!(f64, Float, |v| v);
impl_from_for_option_value!(&str, Str, String::from);
impl_from_for_option_value!(String, Str, |v| v);

/// Backend specific options, keyed by the backend's own option names
pub type BackendOptions = BTreeMap<String, OptionValue>;

/// Settings shared by every backend.
///
/// Fields left as `None` keep the selected backend's own default.
/// Not every backend honors every field; backends ignore the generic
/// fields they have no equivalent for.
///
/// ```
/// use lpsolvers::SolverSettingsBuilder;
///
/// let settings = SolverSettingsBuilder::default()
///     .sym_proj(true)
///     .max_iter(50)
///     .backend_option("equilibrate_enable", false)
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.max_iter, Some(50));
/// ```

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverSettings {
    ///verbose printing from the backend
    #[builder(default = "false")]
    pub verbose: bool,

    ///project symmetric backend inputs onto their symmetric part.
    ///An LP has no quadratic term, so Clarabel only ever receives the
    ///projection of its zero `P` and the `good_lp` backends ignore the
    ///flag.  Accepted for interface compatibility; it does not change
    ///results.
    #[builder(default = "false")]
    pub sym_proj: bool,

    ///maximum number of iterations
    #[builder(default, setter(strip_option))]
    pub max_iter: Option<u32>,

    ///maximum run time (seconds)
    #[builder(default = "f64::INFINITY")]
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_time_limit"))]
    pub time_limit: f64,

    ///absolute duality gap tolerance
    #[builder(default, setter(strip_option))]
    pub tol_gap_abs: Option<f64>,

    ///relative duality gap tolerance
    #[builder(default, setter(strip_option))]
    pub tol_gap_rel: Option<f64>,

    ///feasibility check tolerance (primal and dual)
    #[builder(default, setter(strip_option))]
    pub tol_feas: Option<f64>,

    ///options passed through to the backend as is
    #[builder(default)]
    pub backend_options: BackendOptions,
}

impl Default for SolverSettings {
    fn default() -> SolverSettings {
        SolverSettings {
            verbose: false,
            sym_proj: false,
            max_iter: None,
            time_limit: f64::INFINITY,
            tol_gap_abs: None,
            tol_gap_rel: None,
            tol_feas: None,
            backend_options: BackendOptions::new(),
        }
    }
}

impl SolverSettings {
    /// Checks that the settings are valid.   Backend options are
    /// checked by the backend that consumes them.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_max_iter(self.max_iter)?;
        validate_time_limit(self.time_limit)?;
        validate_tolerance("tol_gap_abs", self.tol_gap_abs)?;
        validate_tolerance("tol_gap_rel", self.tol_gap_rel)?;
        validate_tolerance("tol_feas", self.tol_feas)?;
        Ok(())
    }

    /// Look up a backend option by name
    pub fn backend_option(&self, key: &str) -> Option<&OptionValue> {
        self.backend_options.get(key)
    }
}

// serde_json writes an infinite time limit as null
#[cfg(feature = "serde")]
fn deserialize_time_limit<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SolverSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SolverSettingsBuilderError::ValidationError(e.to_string())
    }
}

impl SolverSettingsBuilder {
    /// Add a single backend option, forwarded to the selected solver
    pub fn backend_option(&mut self, key: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.backend_options
            .get_or_insert_with(BackendOptions::new)
            .insert(key.to_string(), value.into());
        self
    }

    /// Automatic pre-build settings validation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(max_iter) = self.max_iter {
            validate_max_iter(max_iter)?;
        }
        if let Some(time_limit) = self.time_limit {
            validate_time_limit(time_limit)?;
        }
        for (name, tol) in [
            ("tol_gap_abs", self.tol_gap_abs),
            ("tol_gap_rel", self.tol_gap_rel),
            ("tol_feas", self.tol_feas),
        ] {
            if let Some(tol) = tol {
                validate_tolerance(name, tol)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_max_iter(max_iter: Option<u32>) -> Result<(), SettingsError> {
    match max_iter {
        Some(0) => Err(SettingsError::BadFieldValue("max_iter")),
        _ => Ok(()),
    }
}

fn validate_time_limit(time_limit: f64) -> Result<(), SettingsError> {
    if time_limit.is_nan() || time_limit < 0. {
        return Err(SettingsError::BadFieldValue("time_limit"));
    }
    Ok(())
}

fn validate_tolerance(name: &'static str, tol: Option<f64>) -> Result<(), SettingsError> {
    match tol {
        Some(tol) if !(tol > 0. && tol.is_finite()) => Err(SettingsError::BadFieldValue(name)),
        _ => Ok(()),
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    let settings = SolverSettingsBuilder::default().build().unwrap();
    assert_eq!(settings, SolverSettings::default());

    // fail on bad values
    assert!(SolverSettingsBuilder::default().max_iter(0).build().is_err());
    assert!(SolverSettingsBuilder::default()
        .time_limit(-1.)
        .build()
        .is_err());
    assert!(SolverSettingsBuilder::default()
        .tol_gap_abs(0.)
        .build()
        .is_err());
    assert!(SolverSettingsBuilder::default()
        .tol_feas(f64::NAN)
        .build()
        .is_err());

    // directly construct a bad SolverSettings and manually check
    let settings = SolverSettings {
        tol_gap_rel: Some(-1e-8),
        ..SolverSettings::default()
    };
    assert!(settings.validate().is_err());

    let settings = SolverSettingsBuilder::default()
        .max_iter(10)
        .tol_gap_abs(1e-9)
        .build()
        .unwrap();
    assert_eq!(settings.max_iter, Some(10));
    assert_eq!(settings.tol_gap_abs, Some(1e-9));
    assert!(settings.validate().is_ok());
}

#[test]
fn test_backend_options() {
    let settings = SolverSettingsBuilder::default()
        .backend_option("max_iter", 20)
        .backend_option("presolve_enable", false)
        .backend_option("direct_solve_method", "qdldl")
        .backend_option("tol_feas", 1e-7)
        .build()
        .unwrap();

    assert_eq!(settings.backend_options.len(), 4);
    assert_eq!(
        settings.backend_option("max_iter").and_then(|v| v.as_u32()),
        Some(20)
    );
    assert_eq!(
        settings
            .backend_option("presolve_enable")
            .and_then(|v| v.as_bool()),
        Some(false)
    );
    assert_eq!(
        settings
            .backend_option("direct_solve_method")
            .and_then(|v| v.as_str()),
        Some("qdldl")
    );
    assert_eq!(
        settings.backend_option("tol_feas").and_then(|v| v.as_f64()),
        Some(1e-7)
    );
    assert!(settings.backend_option("missing").is_none());

    // conversions between numeric kinds
    assert_eq!(OptionValue::Float(3.).as_u32(), Some(3));
    assert_eq!(OptionValue::Float(3.5).as_u32(), None);
    assert_eq!(OptionValue::Int(-1).as_u32(), None);
    assert_eq!(OptionValue::Int(2).as_f64(), Some(2.));
    assert_eq!(OptionValue::from(true).to_string(), "on");
}
