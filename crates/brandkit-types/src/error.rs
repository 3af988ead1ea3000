//! Error type shared by the engine and its adapters.
//!
//! Every failure carries a stable `BRANDINGM_#####` code so callers and
//! operators can match on conditions across releases. Client errors
//! (caller-fixable input) and server errors (backing store failures) are
//! distinguished by [`Error::is_client_error`]; server errors keep the
//! driver error they wrap reachable through `std::error::Error::source`.

pub type BkResult<T> = std::result::Result<T, Error>;

/// Storage operation a server error originated from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOp {
	Open,
	ContentExists,
	CreateContent,
	UpdateContent,
	ReadContent,
	DeleteContent,
	PreferenceExists,
	WritePreference,
	ReadPreference,
	DeletePreference,
}

impl StoreOp {
	pub fn as_str(self) -> &'static str {
		match self {
			StoreOp::Open => "opening the content store",
			StoreOp::ContentExists => "checking existence of custom layout content",
			StoreOp::CreateContent => "adding custom layout content",
			StoreOp::UpdateContent => "updating custom layout content",
			StoreOp::ReadContent => "retrieving custom layout content",
			StoreOp::DeleteContent => "deleting custom layout content",
			StoreOp::PreferenceExists => "checking existence of branding preferences",
			StoreOp::WritePreference => "storing branding preferences",
			StoreOp::ReadPreference => "getting branding preferences",
			StoreOp::DeletePreference => "deleting branding preferences",
		}
	}

	pub fn code(self) -> &'static str {
		match self {
			StoreOp::Open => "BRANDINGM_00008",
			StoreOp::ContentExists => "BRANDINGM_00043",
			StoreOp::CreateContent => "BRANDINGM_00039",
			StoreOp::UpdateContent => "BRANDINGM_00041",
			StoreOp::ReadContent => "BRANDINGM_00038",
			StoreOp::DeleteContent => "BRANDINGM_00040",
			StoreOp::PreferenceExists => "BRANDINGM_00009",
			StoreOp::WritePreference => "BRANDINGM_00005",
			StoreOp::ReadPreference => "BRANDINGM_00004",
			StoreOp::DeletePreference => "BRANDINGM_00006",
		}
	}
}

impl std::fmt::Display for StoreOp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug)]
pub enum Error {
	/// Preference document did not parse as a non-empty key-value tree
	InvalidPreference { tenant: Box<str> },
	/// Custom layout selected but the html part is missing or blank
	InvalidCustomLayoutContent,
	/// Custom layout html lacks a mandatory placeholder component
	MandatoryComponentNotFound { component: Box<str> },
	/// Nothing is configured for the scope
	NotConfigured { scope: Box<str> },
	/// Content rows already exist for the scope
	AlreadyExists { scope: Box<str> },
	/// Backing store failure, wrapping the driver error
	Storage { op: StoreOp, scope: Box<str>, source: Box<dyn std::error::Error + Send + Sync> },
	/// Invariant breach inside the engine itself
	Internal(String),
}

impl Error {
	pub fn storage<E>(op: StoreOp, scope: impl std::fmt::Display, source: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Error::Storage { op, scope: scope.to_string().into(), source: Box::new(source) }
	}

	pub fn not_configured(scope: impl std::fmt::Display) -> Self {
		Error::NotConfigured { scope: scope.to_string().into() }
	}

	pub fn already_exists(scope: impl std::fmt::Display) -> Self {
		Error::AlreadyExists { scope: scope.to_string().into() }
	}

	/// Stable error code of this condition
	pub fn code(&self) -> &'static str {
		match self {
			Error::InvalidPreference { .. } => "BRANDINGM_00001",
			Error::InvalidCustomLayoutContent => "BRANDINGM_00034",
			Error::MandatoryComponentNotFound { .. } => "BRANDINGM_00047",
			Error::NotConfigured { .. } => "BRANDINGM_00002",
			Error::AlreadyExists { .. } => "BRANDINGM_00037",
			Error::Storage { op, .. } => op.code(),
			Error::Internal(_) => "BRANDINGM_00042",
		}
	}

	/// True for conditions the caller can fix by changing its input
	pub fn is_client_error(&self) -> bool {
		!matches!(self, Error::Storage { .. } | Error::Internal(_))
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::InvalidPreference { tenant } => write!(
				f,
				"[{}] Invalid branding preference configurations for tenant: {}",
				self.code(),
				tenant
			),
			Error::InvalidCustomLayoutContent => {
				write!(f, "[{}] Invalid custom layout content", self.code())
			}
			Error::MandatoryComponentNotFound { component } => write!(
				f,
				"[{}] Mandatory component '{}' not found in the custom layout html content",
				self.code(),
				component
			),
			Error::NotConfigured { scope } => {
				write!(f, "[{}] Branding preferences are not configured for: {}", self.code(), scope)
			}
			Error::AlreadyExists { scope } => {
				write!(f, "[{}] Custom layout content already exists for: {}", self.code(), scope)
			}
			Error::Storage { op, scope, source } => {
				write!(f, "[{}] Error while {} for: {}: {}", self.code(), op, scope, source)
			}
			Error::Internal(msg) => write!(f, "[{}] Internal error: {}", self.code(), msg),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Storage { source, .. } => Some(&**source),
			_ => None,
		}
	}
}


// vim: ts=4
