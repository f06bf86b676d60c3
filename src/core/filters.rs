use crate::models::{attr, AnimalFilter, AnimalType, Candidate, ServiceType};

/// Training status a candidate must reach before service placement
pub const READY_STATUS: &str = "Ready";

/// Specialization that qualifies a horse for equine therapy
pub const THERAPY_SPECIALIZATION: &str = "Therapy";

/// Universal prefilter for adopter-facing matches: adoptable and not reserved
pub fn adoption_filter(animal_type: AnimalType) -> AnimalFilter {
    AnimalFilter::new(animal_type)
        .with(attr::ADOPTABLE, true)
        .with(attr::RESERVED, false)
}

/// Eligibility prefilter for service placement
///
/// Service animals are retained by the organization, so they must not be on
/// the adoption list. Dogs must be trained for the requested service type;
/// horses must carry the therapy specialization.
pub fn service_eligibility_filter(service_type: ServiceType) -> AnimalFilter {
    let filter = AnimalFilter::new(service_type.pool())
        .with(attr::ADOPTABLE, false)
        .with(attr::RESERVED, false)
        .with(attr::TRAINING_STATUS, READY_STATUS);

    match service_type {
        ServiceType::Service | ServiceType::Therapy | ServiceType::Search => {
            filter.with(attr::SERVICE_TYPE, service_type.as_str())
        }
        ServiceType::EquineTherapy => {
            filter.with(attr::TRAINING_SPECIALIZATION, THERAPY_SPECIALIZATION)
        }
    }
}

/// Check if a candidate may be offered to adopters
#[inline]
pub fn is_adoptable(candidate: &Candidate) -> bool {
    adoption_filter(candidate.animal_type).matches(candidate)
}

/// Check if a candidate is eligible for a service assignment
#[inline]
pub fn is_service_eligible(candidate: &Candidate, service_type: ServiceType) -> bool {
    service_eligibility_filter(service_type).matches(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_dog(service_type: &str) -> Candidate {
        Candidate::new("dog", AnimalType::Dog)
            .with(attr::ADOPTABLE, false)
            .with(attr::RESERVED, false)
            .with(attr::TRAINING_STATUS, READY_STATUS)
            .with(attr::SERVICE_TYPE, service_type)
    }

    #[test]
    fn test_adoptable_candidate_passes() {
        let candidate = Candidate::new("1", AnimalType::Bird)
            .with(attr::ADOPTABLE, true)
            .with(attr::RESERVED, false);
        assert!(is_adoptable(&candidate));
    }

    #[test]
    fn test_reserved_candidate_filtered() {
        let candidate = Candidate::new("1", AnimalType::Bird)
            .with(attr::ADOPTABLE, true)
            .with(attr::RESERVED, true);
        assert!(!is_adoptable(&candidate));
    }

    #[test]
    fn test_service_dog_must_match_service_type() {
        let dog = service_dog("THERAPY");
        assert!(is_service_eligible(&dog, ServiceType::Therapy));
        assert!(!is_service_eligible(&dog, ServiceType::Search));
        assert!(!is_service_eligible(&dog, ServiceType::EquineTherapy));
    }

    #[test]
    fn test_service_dog_must_be_ready() {
        let dog = service_dog("SERVICE").with(attr::TRAINING_STATUS, "In Training");
        assert!(!is_service_eligible(&dog, ServiceType::Service));
    }

    #[test]
    fn test_therapy_horse_eligibility() {
        let horse = Candidate::new("h", AnimalType::Horse)
            .with(attr::ADOPTABLE, false)
            .with(attr::RESERVED, false)
            .with(attr::TRAINING_STATUS, READY_STATUS)
            .with(attr::TRAINING_SPECIALIZATION, THERAPY_SPECIALIZATION);
        assert!(is_service_eligible(&horse, ServiceType::EquineTherapy));

        let riding = horse.with(attr::TRAINING_SPECIALIZATION, "Riding");
        assert!(!is_service_eligible(&riding, ServiceType::EquineTherapy));
    }
}
