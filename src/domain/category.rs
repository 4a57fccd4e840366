//! Entity category taxonomy
//!
//! The closed set of sensitive-data categories the pipeline can emit,
//! together with the per-category metadata (compliance class, generic
//! replacement token) that drives reporting and redaction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compliance grouping for reporting purposes
///
/// Every category belongs to exactly one grouping. Groupings affect only
/// reporting and audit output; replacement behavior is driven solely by the
/// per-category token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceClass {
    /// HIPAA Safe Harbor identifiers (45 CFR §164.514(b)(2))
    Hipaa,
    /// ISO 27001/27002 sensitive personal data
    Iso27001,
    /// SOC 2 financial and credential data
    Soc2,
}

impl fmt::Display for ComplianceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hipaa => write!(f, "hipaa"),
            Self::Iso27001 => write!(f, "iso_27001"),
            Self::Soc2 => write!(f, "soc_2"),
        }
    }
}

/// Sensitive-entity category
///
/// Closed enumeration covering the HIPAA Safe Harbor identifiers plus the
/// ISO 27001 sensitive-data and SOC 2 financial/credential classes. Every
/// variant maps to exactly one generic replacement token via
/// [`Category::generic_token`]; anything the taxonomy cannot name is
/// [`Category::Other`], which fails closed to the default token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    // HIPAA Safe Harbor identifiers
    /// Names (first, middle, last, maiden)
    Person,
    /// Geographic subdivisions smaller than state
    Location,
    /// Street addresses
    Address,
    /// City names
    City,
    /// ZIP/postal codes
    ZipCode,
    /// Country names
    Country,
    /// Date elements related to an individual
    Date,
    /// Birth dates specifically (detected with explicit context)
    DateOfBirth,
    /// Ages of 89 and under
    Age,
    /// Ages over 89 (mandatory special handling under HIPAA)
    #[serde(rename = "AGE_OVER_89")]
    AgeOver89,
    /// Telephone numbers
    PhoneNumber,
    /// Fax numbers
    FaxNumber,
    /// Email addresses
    EmailAddress,
    /// Web URLs
    Url,
    /// IP addresses
    IpAddress,
    /// Social Security Numbers
    Ssn,
    /// Medical record numbers
    MedicalRecordNumber,
    /// Health plan beneficiary numbers
    HealthPlanNumber,
    /// Prescription numbers
    PrescriptionNumber,
    /// National Provider Identifiers
    NpiNumber,
    /// DEA registration numbers
    DeaNumber,
    /// Biometric identifiers (fingerprints, retinal scans, voiceprints)
    BiometricId,
    /// Genetic/DNA markers
    GeneticMarker,
    /// Full-face photographs and comparable images
    FacePhotograph,
    /// Vehicle identification numbers
    Vin,
    /// Vehicle license plates
    LicensePlate,
    /// Device identifiers
    DeviceId,
    /// Device serial numbers
    SerialNumber,
    /// Mobile equipment identifiers
    Imei,
    /// Hardware MAC addresses
    MacAddress,
    /// Certificate numbers
    CertificateNumber,
    /// License numbers
    LicenseNumber,
    /// Patient identifiers not covered by a more specific category
    PatientId,
    /// Any other unique identifying number, characteristic, or code
    UniqueIdentifier,

    // ISO 27001 sensitive personal data
    /// Organization names
    Organization,
    /// Gender/sex statements
    Gender,
    /// Ethnicity and race references
    Ethnicity,
    /// Marital status
    MaritalStatus,
    /// National identity numbers
    NationalId,
    /// Tax identifiers
    TaxId,
    /// Passport numbers
    Passport,
    /// Driver license numbers
    DriverLicense,

    // SOC 2 financial and credential data
    /// Payment card numbers
    CreditCard,
    /// IBAN codes
    IbanCode,
    /// Bank/financial account numbers
    AccountNumber,
    /// ABA routing numbers
    RoutingNumber,
    /// Bank account references
    BankAccount,
    /// SWIFT/BIC codes
    SwiftCode,
    /// Cryptocurrency wallet addresses
    CryptoWallet,
    /// API keys
    ApiKey,
    /// Passwords
    Password,
    /// Access/bearer tokens
    AccessToken,

    /// Catch-all for labels outside the taxonomy; fails closed to the
    /// default replacement token
    Other,
}

impl Category {
    /// Wire label for this category (matches the serialized form)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Location => "LOCATION",
            Self::Address => "ADDRESS",
            Self::City => "CITY",
            Self::ZipCode => "ZIP_CODE",
            Self::Country => "COUNTRY",
            Self::Date => "DATE",
            Self::DateOfBirth => "DATE_OF_BIRTH",
            Self::Age => "AGE",
            Self::AgeOver89 => "AGE_OVER_89",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::FaxNumber => "FAX_NUMBER",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::Url => "URL",
            Self::IpAddress => "IP_ADDRESS",
            Self::Ssn => "SSN",
            Self::MedicalRecordNumber => "MEDICAL_RECORD_NUMBER",
            Self::HealthPlanNumber => "HEALTH_PLAN_NUMBER",
            Self::PrescriptionNumber => "PRESCRIPTION_NUMBER",
            Self::NpiNumber => "NPI_NUMBER",
            Self::DeaNumber => "DEA_NUMBER",
            Self::BiometricId => "BIOMETRIC_ID",
            Self::GeneticMarker => "GENETIC_MARKER",
            Self::FacePhotograph => "FACE_PHOTOGRAPH",
            Self::Vin => "VIN",
            Self::LicensePlate => "LICENSE_PLATE",
            Self::DeviceId => "DEVICE_ID",
            Self::SerialNumber => "SERIAL_NUMBER",
            Self::Imei => "IMEI",
            Self::MacAddress => "MAC_ADDRESS",
            Self::CertificateNumber => "CERTIFICATE_NUMBER",
            Self::LicenseNumber => "LICENSE_NUMBER",
            Self::PatientId => "PATIENT_ID",
            Self::UniqueIdentifier => "UNIQUE_IDENTIFIER",
            Self::Organization => "ORGANIZATION",
            Self::Gender => "GENDER",
            Self::Ethnicity => "ETHNICITY",
            Self::MaritalStatus => "MARITAL_STATUS",
            Self::NationalId => "NATIONAL_ID",
            Self::TaxId => "TAX_ID",
            Self::Passport => "PASSPORT",
            Self::DriverLicense => "DRIVER_LICENSE",
            Self::CreditCard => "CREDIT_CARD",
            Self::IbanCode => "IBAN_CODE",
            Self::AccountNumber => "ACCOUNT_NUMBER",
            Self::RoutingNumber => "ROUTING_NUMBER",
            Self::BankAccount => "BANK_ACCOUNT",
            Self::SwiftCode => "SWIFT_CODE",
            Self::CryptoWallet => "CRYPTO_WALLET",
            Self::ApiKey => "API_KEY",
            Self::Password => "PASSWORD",
            Self::AccessToken => "ACCESS_TOKEN",
            Self::Other => "OTHER",
        }
    }

    /// Compliance grouping this category is reported under
    pub fn compliance_class(&self) -> ComplianceClass {
        match self {
            Self::Person
            | Self::Location
            | Self::Address
            | Self::City
            | Self::ZipCode
            | Self::Country
            | Self::Date
            | Self::DateOfBirth
            | Self::Age
            | Self::AgeOver89
            | Self::PhoneNumber
            | Self::FaxNumber
            | Self::EmailAddress
            | Self::Url
            | Self::IpAddress
            | Self::Ssn
            | Self::MedicalRecordNumber
            | Self::HealthPlanNumber
            | Self::PrescriptionNumber
            | Self::NpiNumber
            | Self::DeaNumber
            | Self::BiometricId
            | Self::GeneticMarker
            | Self::FacePhotograph
            | Self::Vin
            | Self::LicensePlate
            | Self::DeviceId
            | Self::SerialNumber
            | Self::Imei
            | Self::MacAddress
            | Self::CertificateNumber
            | Self::LicenseNumber
            | Self::PatientId
            | Self::UniqueIdentifier => ComplianceClass::Hipaa,
            Self::Organization
            | Self::Gender
            | Self::Ethnicity
            | Self::MaritalStatus
            | Self::NationalId
            | Self::TaxId
            | Self::Passport
            | Self::DriverLicense
            | Self::Other => ComplianceClass::Iso27001,
            Self::CreditCard
            | Self::IbanCode
            | Self::AccountNumber
            | Self::RoutingNumber
            | Self::BankAccount
            | Self::SwiftCode
            | Self::CryptoWallet
            | Self::ApiKey
            | Self::Password
            | Self::AccessToken => ComplianceClass::Soc2,
        }
    }

    /// Built-in generic replacement token for this category
    ///
    /// The replacement table can override these per deployment; this is the
    /// compiled-in baseline that keeps replacement total over the enum.
    pub fn generic_token(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Location => "location",
            Self::Address => "address",
            Self::City => "city",
            Self::ZipCode => "zipcode",
            Self::Country => "country",
            Self::Date | Self::DateOfBirth => "date",
            Self::Age | Self::AgeOver89 => "age",
            Self::PhoneNumber => "phone",
            Self::FaxNumber => "fax",
            Self::EmailAddress => "email",
            Self::Url => "website",
            Self::IpAddress | Self::MacAddress => "address",
            Self::Ssn
            | Self::UniqueIdentifier
            | Self::NationalId
            | Self::TaxId
            | Self::Passport
            | Self::DriverLicense => "identifier",
            Self::MedicalRecordNumber => "medical_record",
            Self::HealthPlanNumber => "health_plan",
            Self::PrescriptionNumber => "prescription",
            Self::NpiNumber => "provider_id",
            Self::DeaNumber | Self::LicenseNumber => "license",
            Self::BiometricId => "biometric",
            Self::GeneticMarker => "genetic_data",
            Self::FacePhotograph => "photo",
            Self::Vin | Self::LicensePlate => "vehicle",
            Self::DeviceId | Self::Imei => "device",
            Self::SerialNumber => "serial",
            Self::CertificateNumber => "certificate",
            Self::PatientId => "patient_id",
            Self::Organization => "organization",
            Self::Gender => "gender",
            Self::Ethnicity | Self::MaritalStatus => "demographic",
            Self::CreditCard => "payment",
            Self::IbanCode | Self::AccountNumber | Self::BankAccount => "account",
            Self::RoutingNumber => "routing",
            Self::SwiftCode => "code",
            Self::CryptoWallet => "wallet",
            Self::ApiKey | Self::Password | Self::AccessToken => "credential",
            Self::Other => "entity",
        }
    }

    /// Parse a wire label into a category, accepting the aliases emitted by
    /// common NER backends (spaCy/Presidio label sets)
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_uppercase();
        let category = match normalized.as_str() {
            "PERSON" | "NAME" | "PER" => Self::Person,
            "LOCATION" | "GPE" | "LOC" => Self::Location,
            "ADDRESS" | "STREET_ADDRESS" => Self::Address,
            "CITY" => Self::City,
            "ZIP_CODE" | "ZIPCODE" => Self::ZipCode,
            "COUNTRY" => Self::Country,
            "DATE" | "DATE_TIME" | "TIME" | "DATE_FULL" | "DATE_ISO" => Self::Date,
            "DATE_OF_BIRTH" | "DOB" | "BIRTH_DATE" => Self::DateOfBirth,
            "AGE" | "AGE_GENERAL" => Self::Age,
            "AGE_OVER_89" => Self::AgeOver89,
            "PHONE_NUMBER" | "PHONE" => Self::PhoneNumber,
            "FAX_NUMBER" | "FAX" => Self::FaxNumber,
            "EMAIL_ADDRESS" | "EMAIL" => Self::EmailAddress,
            "URL" => Self::Url,
            "IP_ADDRESS" => Self::IpAddress,
            "SSN" | "US_SSN" => Self::Ssn,
            "MEDICAL_RECORD_NUMBER" | "MRN" => Self::MedicalRecordNumber,
            "HEALTH_PLAN_NUMBER" | "INSURANCE_NUMBER" | "POLICY_NUMBER" | "MEMBER_ID" => {
                Self::HealthPlanNumber
            }
            "PRESCRIPTION_NUMBER" => Self::PrescriptionNumber,
            "NPI_NUMBER" => Self::NpiNumber,
            "DEA_NUMBER" => Self::DeaNumber,
            "BIOMETRIC_ID" | "FINGERPRINT" | "RETINA_SCAN" | "FACIAL_RECOGNITION" => {
                Self::BiometricId
            }
            "GENETIC_MARKER" | "DNA_SEQUENCE" => Self::GeneticMarker,
            "FACE_PHOTOGRAPH" | "PHOTO" => Self::FacePhotograph,
            "VIN" => Self::Vin,
            "LICENSE_PLATE" => Self::LicensePlate,
            "DEVICE_ID" | "DEVICE" => Self::DeviceId,
            "SERIAL_NUMBER" => Self::SerialNumber,
            "IMEI" => Self::Imei,
            "MAC_ADDRESS" => Self::MacAddress,
            "CERTIFICATE_NUMBER" => Self::CertificateNumber,
            "LICENSE_NUMBER" | "MEDICAL_LICENSE" => Self::LicenseNumber,
            "PATIENT_ID" => Self::PatientId,
            "UNIQUE_IDENTIFIER" | "IDENTIFIER" => Self::UniqueIdentifier,
            "ORGANIZATION" | "ORG" | "FACILITY" | "HOSPITAL" => Self::Organization,
            "GENDER" | "GENDER_EXPLICIT" => Self::Gender,
            "ETHNICITY" | "RACE" | "NRP" => Self::Ethnicity,
            "MARITAL_STATUS" => Self::MaritalStatus,
            "NATIONAL_ID" => Self::NationalId,
            "TAX_ID" => Self::TaxId,
            "PASSPORT" | "US_PASSPORT" => Self::Passport,
            "DRIVER_LICENSE" | "US_DRIVER_LICENSE" => Self::DriverLicense,
            "CREDIT_CARD" => Self::CreditCard,
            "IBAN_CODE" | "IBAN" => Self::IbanCode,
            "ACCOUNT_NUMBER" | "ACCOUNT" => Self::AccountNumber,
            "ROUTING_NUMBER" => Self::RoutingNumber,
            "BANK_ACCOUNT" => Self::BankAccount,
            "SWIFT_CODE" => Self::SwiftCode,
            "CRYPTO_WALLET" | "CRYPTO" => Self::CryptoWallet,
            "API_KEY" | "SECRET_KEY" => Self::ApiKey,
            "PASSWORD" => Self::Password,
            "ACCESS_TOKEN" | "AUTH_TOKEN" => Self::AccessToken,
            _ => return None,
        };
        Some(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
