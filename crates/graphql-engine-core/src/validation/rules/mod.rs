mod default_values_of_correct_type;
mod fields_on_correct_type;
mod fragments_on_composite_types;
mod known_directives;
mod known_fragment_names;
mod known_operation_types;
mod known_type_names;
mod lone_anonymous_operation;
mod max_depth;
mod no_fragment_cycles;
mod no_undefined_variables;
mod no_unused_fragments;
mod no_unused_variables;
mod overlapping_fields_can_be_merged;
mod possible_fragment_spreads;
mod scalar_leafs;
mod single_field_subscriptions;
mod unique_directives_per_location;
mod unique_fragment_names;
mod unique_operation_names;
mod unique_variable_names;
mod valid_arguments;
mod variable_usages;
mod variables_are_input_types;
mod variables_in_allowed_position;

pub use default_values_of_correct_type::DefaultValuesOfCorrectType;
pub use fields_on_correct_type::FieldsOnCorrectType;
pub use fragments_on_composite_types::FragmentsOnCompositeTypes;
pub use known_directives::KnownDirectives;
pub use known_fragment_names::KnownFragmentNames;
pub use known_operation_types::KnownOperationTypes;
pub use known_type_names::KnownTypeNames;
pub use lone_anonymous_operation::LoneAnonymousOperation;
pub(crate) use max_depth::check_max_depth;
pub use no_fragment_cycles::NoFragmentCycles;
pub use no_undefined_variables::NoUndefinedVariables;
pub use no_unused_fragments::NoUnusedFragments;
pub use no_unused_variables::NoUnusedVariables;
pub use overlapping_fields_can_be_merged::OverlappingFieldsCanBeMerged;
pub use possible_fragment_spreads::PossibleFragmentSpreads;
pub use scalar_leafs::ScalarLeafs;
pub use single_field_subscriptions::SingleFieldSubscriptions;
pub use unique_directives_per_location::UniqueDirectivesPerLocation;
pub use unique_fragment_names::UniqueFragmentNames;
pub use unique_operation_names::UniqueOperationNames;
pub use unique_variable_names::UniqueVariableNames;
pub use valid_arguments::ValidArguments;
pub use variables_are_input_types::VariablesAreInputTypes;
pub use variables_in_allowed_position::VariablesInAllowedPosition;
